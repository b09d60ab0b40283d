//! Application state for the viewer
//!
//! Owns the open files and the one [`ViewportLayout`], and turns key and resize
//! events into layout operations. Everything here is synchronous: each event
//! mutates state and redraws in full before the next one is read.

use super::command::Command;
use super::layout::{LayoutSettings, ViewportLayout};
use super::sink::{RenderError, RenderSink};
use super::ui::render_help;
use crossterm::event::KeyEvent;
use etail_config::EtailConfig;
use etail_table::OpenFiles;
use tracing::debug;

pub struct App {
    pub files: OpenFiles,
    pub layout: ViewportLayout,
    /// The help screen is shown instead of the grid
    pub show_help: bool,
    pub should_quit: bool,
    /// Check files for changes before each redraw
    reload_on_redraw: bool,
}

impl App {
    pub fn new(files: OpenFiles, layout: ViewportLayout) -> Self {
        App {
            files,
            layout,
            show_help: false,
            should_quit: false,
            reload_on_redraw: true,
        }
    }

    pub fn from_config(files: OpenFiles, config: &EtailConfig) -> Self {
        let layout = ViewportLayout::new(LayoutSettings::from(&config.layout))
            .with_filenames(config.layout.show_filenames);
        App::new(files, layout).with_reload(config.reload.on_redraw)
    }

    pub fn with_reload(mut self, on_redraw: bool) -> Self {
        self.reload_on_redraw = on_redraw;
        self
    }

    /// Re-read changed files, if enabled
    fn refresh(&mut self) {
        if self.reload_on_redraw && self.files.check_updates() {
            debug!("files changed on disk");
        }
    }

    /// Draw the current screen: help if shown, otherwise the grid
    pub fn redraw<S: RenderSink>(&mut self, sink: &mut S) -> Result<(), RenderError> {
        if self.show_help {
            return render_help(sink, self.layout.theme());
        }
        self.refresh();
        self.layout.redraw(self.files.as_slice(), sink)
    }

    /// Terminal size changed; the layout reads the new size on redraw
    pub fn handle_resize<S: RenderSink>(&mut self, sink: &mut S) -> Result<(), RenderError> {
        self.redraw(sink)
    }

    pub fn handle_key<S: RenderSink>(
        &mut self,
        key: KeyEvent,
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let command = Command::from_key(key);

        if self.show_help {
            if command == Some(Command::Quit) {
                self.should_quit = true;
                return Ok(());
            }
            self.show_help = false;
            return self.redraw(sink);
        }

        let Some(command) = command else {
            return Ok(());
        };
        debug!(?command, "key");

        if command == Command::Quit {
            self.should_quit = true;
            return Ok(());
        }
        if command == Command::Help {
            self.show_help = true;
            return self.redraw(sink);
        }

        self.refresh();
        let files = self.files.as_slice();
        let layout = &mut self.layout;
        match command {
            Command::NextPage => layout.next_page(files, sink),
            Command::PrevPage => layout.prev_page(files, sink),
            Command::ScrollRight => layout.scroll_right(files, sink),
            Command::ScrollLeft => layout.scroll_left(files, sink),
            Command::Top => layout.top(files, sink),
            Command::End => layout.end(files, sink),
            Command::FixRight => layout.fix_right(files, sink),
            Command::FixLeft => layout.fix_left(files, sink),
            Command::ToggleFilenames => layout.toggle_filenames(files, sink),
            Command::NextFiles => layout.next_files(files, sink),
            Command::PrevFiles => layout.prev_files(files, sink),
            Command::Quit | Command::Help => Ok(()),
        }
    }
}
