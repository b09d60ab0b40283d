//! Key bindings
//!
//! Maps terminal key events to viewer commands. Letter keys match in either
//! case. Keys with Ctrl or Alt held are ignored, except Ctrl+C which quits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    NextPage,
    PrevPage,
    ScrollRight,
    ScrollLeft,
    Top,
    End,
    FixRight,
    FixLeft,
    ToggleFilenames,
    NextFiles,
    PrevFiles,
    Help,
}

impl Command {
    /// The command bound to `key`, if any
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
                _ => None,
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        let command = match key.code {
            KeyCode::Esc => Command::Quit,
            KeyCode::Down | KeyCode::PageDown => Command::NextPage,
            KeyCode::Up | KeyCode::PageUp => Command::PrevPage,
            KeyCode::Right => Command::ScrollRight,
            KeyCode::Left => Command::ScrollLeft,
            KeyCode::Home => Command::Top,
            KeyCode::End => Command::End,
            KeyCode::Tab => Command::NextFiles,
            KeyCode::BackTab => Command::PrevFiles,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => Command::Quit,
                ' ' | 'n' => Command::NextPage,
                'p' => Command::PrevPage,
                'r' | 'f' => Command::ScrollRight,
                'l' | 'b' => Command::ScrollLeft,
                'a' => Command::Top,
                'e' => Command::End,
                'w' => Command::FixRight,
                's' => Command::FixLeft,
                'd' => Command::ToggleFilenames,
                ']' => Command::NextFiles,
                '[' => Command::PrevFiles,
                'h' => Command::Help,
                _ => return None,
            },
            _ => return None,
        };
        Some(command)
    }
}
