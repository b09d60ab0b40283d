//! Terminal setup and the event loop

use super::app::App;
use super::sink::{RenderError, TerminalSink};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use etail_config::EtailConfig;
use etail_table::OpenFiles;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use tracing::info;

/// Run the viewer on `files` until the user quits
///
/// The terminal is put into raw mode on the alternate screen for the duration
/// and restored on every exit path, including errors.
pub fn run_viewer(files: OpenFiles, config: &EtailConfig) -> Result<(), RenderError> {
    info!(files = files.len(), "starting viewer");
    let mut sink = setup_terminal()?;
    let mut app = App::from_config(files, config);

    let result = run_app(&mut app, &mut sink);
    let restored = restore_terminal(&mut sink);
    result.and(restored)
}

fn setup_terminal() -> Result<TerminalSink<CrosstermBackend<Stdout>>, RenderError> {
    enable_raw_mode().map_err(RenderError::Terminal)?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(RenderError::Terminal(err));
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(TerminalSink::new(terminal)),
        Err(err) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(RenderError::Terminal(err))
        }
    }
}

fn restore_terminal<B: Backend + io::Write>(
    sink: &mut TerminalSink<B>,
) -> Result<(), RenderError> {
    disable_raw_mode().map_err(RenderError::Terminal)?;
    execute!(sink.terminal_mut().backend_mut(), LeaveAlternateScreen)
        .map_err(RenderError::Terminal)?;
    sink.terminal_mut()
        .show_cursor()
        .map_err(RenderError::Terminal)
}

fn run_app<B: Backend>(app: &mut App, sink: &mut TerminalSink<B>) -> Result<(), RenderError> {
    app.redraw(sink)?;

    while !app.should_quit {
        match event::read().map_err(RenderError::Terminal)? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                app.handle_key(key, sink)?;
            }
            Event::Resize(_, _) => app.handle_resize(sink)?,
            _ => {}
        }
    }
    info!("viewer closed");
    Ok(())
}
