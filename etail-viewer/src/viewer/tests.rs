//! Test infrastructure for the viewer
//!
//! Provides utilities for testing the full application including:
//! - TestApp: wrapper driving `App` against a ratatui `TestBackend`
//! - Keyboard helpers: easy creation of keyboard events
//! - Render helpers: reading back the rendered grid

use super::app::App;
use super::layout::ViewportLayout;
use super::sink::TerminalSink;
use crossterm::event::{KeyCode, KeyEvent};
use etail_table::{OpenFiles, TabularSource};
use ratatui::backend::{Backend, TestBackend};
use ratatui::style::Modifier;
use ratatui::Terminal;
use std::fs::{self, File};
use std::time::{Duration, SystemTime};

/// Test application wrapper with test backend
pub struct TestApp {
    app: App,
    sink: TerminalSink<TestBackend>,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a test app over in-memory files, already drawn once
    pub fn with_files(files: Vec<TabularSource>, width: u16, height: u16) -> Self {
        let app = App::new(OpenFiles::new(files), ViewportLayout::default()).with_reload(false);
        Self::with_app(app, width, height)
    }

    pub fn with_app(app: App, width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("Failed to create terminal");
        let mut test_app = TestApp {
            app,
            sink: TerminalSink::new(terminal),
        };
        test_app.app.redraw(&mut test_app.sink).expect("Initial redraw failed");
        test_app
    }

    /// Send a keyboard event and return the rendered output
    pub fn send_key(&mut self, code: KeyCode) -> String {
        self.send_event(keyboard::key(code))
    }

    pub fn send_event(&mut self, key: KeyEvent) -> String {
        self.app
            .handle_key(key, &mut self.sink)
            .expect("Key handling failed");
        self.terminal_output()
    }

    /// Resize the backend and deliver the resize event
    pub fn resize(&mut self, width: u16, height: u16) -> String {
        self.sink.terminal_mut().backend_mut().resize(width, height);
        self.app
            .handle_resize(&mut self.sink)
            .expect("Resize redraw failed");
        self.terminal_output()
    }

    /// Get the current terminal output as a string
    pub fn terminal_output(&self) -> String {
        let backend = self.sink.terminal().backend();
        let size = backend.size().expect("Failed to read size");
        let mut output = String::new();

        for y in 0..size.height {
            for x in 0..size.width {
                if let Some(cell) = backend.buffer().cell((x, y)) {
                    output.push_str(cell.symbol());
                } else {
                    output.push(' ');
                }
            }
            output.push('\n');
        }

        output
    }

    /// One rendered row, trailing blanks removed
    pub fn line(&self, y: usize) -> String {
        self.terminal_output()
            .lines()
            .nth(y)
            .map(|line| line.trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn is_reversed(&self, x: u16, y: u16) -> bool {
        self.sink
            .terminal()
            .backend()
            .buffer()
            .cell((x, y))
            .is_some_and(|cell| cell.modifier.contains(Modifier::REVERSED))
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn should_quit(&self) -> bool {
        self.app.should_quit
    }
}

/// Helper functions for creating keyboard events
#[allow(dead_code)]
pub mod keyboard {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Create a key event with no modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Create a key event with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }
}

/// A comma file whose rows are `{prefix}{row}` in every column
fn table(name: &str, header: &str, prefix: &str, rows: usize) -> TabularSource {
    let columns = header.split(',').count();
    let mut lines = vec![header.to_string()];
    for row in 0..rows {
        lines.push(vec![format!("{prefix}{row}"); columns].join(","));
    }
    TabularSource::from_lines(name, lines.iter().map(String::as_str))
}

fn two_files() -> Vec<TabularSource> {
    vec![
        table("first.csv", "city,country,population", "c", 5),
        table("second.csv", "id,score", "s", 2),
    ]
}

#[test]
fn test_two_files_render_in_stacked_panes() {
    let app = TestApp::with_files(two_files(), 80, 20);

    assert_eq!(app.line(0), "city country population");
    assert_eq!(app.line(1), "c0   c0      c0");
    assert_eq!(app.line(5), "c4   c4      c4");
    assert_eq!(app.line(10), "id score");
    assert_eq!(app.line(12), "s1 s1");
    assert!(app.is_reversed(0, 0));
    assert!(app.is_reversed(0, 10));
    assert!(!app.is_reversed(0, 1));
    assert_eq!(app.app().layout.geometry().pane_height, 10);
}

#[test]
fn test_unbound_key_leaves_screen_alone() {
    let mut app = TestApp::with_files(two_files(), 80, 20);
    let before = app.terminal_output();
    let after = app.send_key(KeyCode::Char('x'));
    assert_eq!(before, after);
}

#[test]
fn test_help_screen_and_dismiss() {
    let mut app = TestApp::with_files(two_files(), 80, 20);

    let output = app.send_key(KeyCode::Char('h'));
    assert!(output.contains("etail: split-screen viewer"));
    assert!(output.contains("toggle file names"));
    assert!(app.app().show_help);

    app.send_key(KeyCode::Char('x'));
    assert!(!app.app().show_help);
    assert!(!app.should_quit());
    assert_eq!(app.line(0), "city country population");
}

#[test]
fn test_quit_from_help() {
    let mut app = TestApp::with_files(two_files(), 80, 20);
    app.send_key(KeyCode::Char('h'));
    app.send_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_quit_keys() {
    let mut app = TestApp::with_files(two_files(), 80, 20);
    app.send_key(KeyCode::Esc);
    assert!(app.should_quit());

    let mut app = TestApp::with_files(two_files(), 80, 20);
    app.send_event(keyboard::ctrl(KeyCode::Char('c')));
    assert!(app.should_quit());
}

#[test]
fn test_toggle_filenames() {
    let mut app = TestApp::with_files(two_files(), 80, 20);

    app.send_key(KeyCode::Char('d'));
    assert_eq!(app.line(0), "first.csv");
    assert_eq!(app.line(1), "city country population");
    assert_eq!(app.line(10), "second.csv");

    app.send_key(KeyCode::Char('D'));
    assert_eq!(app.line(0), "city country population");
}

#[test]
fn test_fix_and_scroll_columns() {
    let mut app = TestApp::with_files(two_files(), 80, 20);

    app.send_key(KeyCode::Char('w'));
    assert_eq!(app.line(0), "city | country population");
    assert_eq!(app.line(10), "id | score");

    app.send_key(KeyCode::Right);
    assert_eq!(app.line(0), "city | population");
    assert_eq!(app.line(10), "id |");

    app.send_key(KeyCode::Left);
    app.send_key(KeyCode::Char('s'));
    assert_eq!(app.line(0), "city country population");
}

#[test]
fn test_shared_vertical_scroll() {
    let files = vec![
        table("long.csv", "l", "l", 30),
        table("short.csv", "s", "s", 3),
    ];
    let mut app = TestApp::with_files(files, 40, 20);

    app.send_key(KeyCode::Char(' '));
    assert_eq!(app.line(1), "l9");
    assert_eq!(app.line(10), "s");
    assert_eq!(app.line(11), "");

    app.send_key(KeyCode::End);
    assert_eq!(app.app().layout.row_offset(), 21);
    assert_eq!(app.line(9), "l29");

    app.send_key(KeyCode::Home);
    assert_eq!(app.line(1), "l0");
    assert_eq!(app.line(11), "s0");
}

#[test]
fn test_resize_redistributes_panes() {
    let mut app = TestApp::with_files(two_files(), 80, 20);

    app.resize(40, 10);
    assert_eq!(app.app().layout.terminal_size(), (40, 10));
    assert_eq!(app.app().layout.geometry().pane_height, 5);
    assert_eq!(app.line(5), "id score");
}

#[test]
fn test_resize_while_help_keeps_help() {
    let mut app = TestApp::with_files(two_files(), 80, 20);
    app.send_key(KeyCode::Char('h'));
    let output = app.resize(70, 20);
    assert!(output.contains("press any key to return"));
}

#[test]
fn test_file_window_keys() {
    let files = (0..4)
        .map(|i| table(&format!("f{i}.csv"), &format!("head{i}"), "v", 1))
        .collect();
    let mut app = TestApp::with_files(files, 40, 10);
    assert_eq!(app.line(0), "head0");

    app.send_key(KeyCode::Tab);
    assert_eq!(app.line(0), "head1");
    app.send_key(KeyCode::Char(']'));
    app.send_key(KeyCode::Char(']'));
    assert_eq!(app.line(0), "head2");
    assert_eq!(app.line(5), "head3");

    app.send_key(KeyCode::BackTab);
    assert_eq!(app.line(0), "head1");
}

#[test]
fn test_changed_file_reloads_on_next_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("live.csv");
    fs::write(&path, "name,value\nalpha,1\n").expect("write");

    let (files, errors) = OpenFiles::open_all([path.clone()]);
    assert!(errors.is_empty());
    let app = App::new(files, ViewportLayout::default());
    let mut app = TestApp::with_app(app, 40, 10);
    assert_eq!(app.line(1), "alpha 1");

    fs::write(&path, "name,value\nbeta,2\ngamma,3\n").expect("rewrite");
    File::options()
        .write(true)
        .open(&path)
        .and_then(|file| file.set_modified(SystemTime::now() + Duration::from_secs(5)))
        .expect("touch");

    app.send_key(KeyCode::Home);
    assert_eq!(app.line(1), "beta  2");
    assert_eq!(app.line(2), "gamma 3");
}

#[test]
fn test_end_after_file_grows_reaches_last_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("growing.csv");
    fs::write(&path, "n\n0\n1\n2\n").expect("write");

    let (files, _) = OpenFiles::open_all([path.clone()]);
    let app = App::new(files, ViewportLayout::default());
    let mut app = TestApp::with_app(app, 40, 9);
    assert_eq!(app.line(3), "2");

    let grown: String = (0..30).map(|row| format!("{row}\n")).collect();
    fs::write(&path, format!("n\n{grown}")).expect("rewrite");
    File::options()
        .write(true)
        .open(&path)
        .and_then(|file| file.set_modified(SystemTime::now() + Duration::from_secs(5)))
        .expect("touch");

    app.send_key(KeyCode::End);
    assert_eq!(app.app().layout.row_offset(), 22);
    assert_eq!(app.line(1), "22");
    assert_eq!(app.line(8), "29");
}
