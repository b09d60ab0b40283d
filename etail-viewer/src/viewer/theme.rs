//! Styles for the grid and the help screen
//!
//! Methods are named after the UI element they style, so drawing code never
//! builds a `Style` inline.

use ratatui::style::{Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    /// Emphasized text: header labels, filename line, separator
    inverse: Style,
    /// Plain data cells
    normal: Style,
    /// Help screen title
    title: Style,
}

impl Theme {
    pub fn header(&self) -> Style {
        self.inverse
    }

    pub fn filename(&self) -> Style {
        self.inverse
    }

    pub fn separator(&self) -> Style {
        self.inverse
    }

    pub fn data(&self) -> Style {
        self.normal
    }

    pub fn help_title(&self) -> Style {
        self.title
    }

    pub fn help_text(&self) -> Style {
        self.normal
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            inverse: Style::default().add_modifier(Modifier::REVERSED),
            normal: Style::default(),
            title: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}
