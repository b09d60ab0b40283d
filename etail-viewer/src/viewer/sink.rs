//! Render sink - the character-cell surface the layout draws onto
//!
//! The layout engine only needs four things from a terminal: clear it, ask its
//! size, paint one glyph at one coordinate, and present the result. The
//! [`RenderSink`] trait captures exactly that, so the engine can be driven by a
//! real terminal, by ratatui's `TestBackend`, or by an in-memory grid.

use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;
use std::fmt;
use std::io;

/// Errors raised while drawing
#[derive(Debug)]
pub enum RenderError {
    /// Redraw was asked for with no open files
    NoFiles,
    /// The surface could not report its size
    Size(io::Error),
    /// The surface could not be cleared
    Clear(io::Error),
    /// The drawn surface could not be presented
    Flush(io::Error),
    /// Terminal setup, teardown or event polling failed
    Terminal(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NoFiles => write!(f, "no files"),
            RenderError::Size(err) => write!(f, "cannot read terminal size: {}", err),
            RenderError::Clear(err) => write!(f, "cannot clear terminal: {}", err),
            RenderError::Flush(err) => write!(f, "cannot flush terminal: {}", err),
            RenderError::Terminal(err) => write!(f, "terminal error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::NoFiles => None,
            RenderError::Size(err)
            | RenderError::Clear(err)
            | RenderError::Flush(err)
            | RenderError::Terminal(err) => Some(err),
        }
    }
}

/// A rectangular grid of character cells
pub trait RenderSink {
    /// Blank the whole surface
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Current `(width, height)` in cells
    fn size(&self) -> Result<(u16, u16), RenderError>;

    /// Paint one glyph. Out-of-range coordinates are ignored.
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);

    /// Present everything drawn since the last clear
    fn flush(&mut self) -> Result<(), RenderError>;
}

/// [`RenderSink`] backed by a ratatui [`Terminal`]
///
/// Cells are staged in a [`Buffer`] and copied into the frame on flush, so a
/// full redraw still goes through ratatui's diffing.
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    staged: Buffer,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        TerminalSink {
            terminal,
            staged: Buffer::empty(Rect::default()),
        }
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    fn clear(&mut self) -> Result<(), RenderError> {
        let size = self.terminal.size().map_err(RenderError::Clear)?;
        self.staged = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), RenderError> {
        let size = self.terminal.size().map_err(RenderError::Size)?;
        Ok((size.width, size.height))
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.staged.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        let staged = &self.staged;
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let buffer = frame.buffer_mut();
                for y in 0..staged.area.height.min(area.height) {
                    for x in 0..staged.area.width.min(area.width) {
                        if let (Some(src), Some(dst)) =
                            (staged.cell((x, y)), buffer.cell_mut((x, y)))
                        {
                            *dst = src.clone();
                        }
                    }
                }
            })
            .map_err(RenderError::Flush)?;
        Ok(())
    }
}

/// In-memory sink for layout tests
#[cfg(test)]
pub struct MemorySink {
    width: u16,
    height: u16,
    cells: Vec<(char, Style)>,
    /// Writes that fell outside the grid
    pub out_of_bounds: usize,
    /// Number of completed flushes
    pub flushes: usize,
    /// When set, `size` fails
    pub broken: bool,
}

#[cfg(test)]
impl MemorySink {
    pub fn new(width: u16, height: u16) -> Self {
        MemorySink {
            width,
            height,
            cells: vec![(' ', Style::default()); usize::from(width) * usize::from(height)],
            out_of_bounds: 0,
            flushes: 0,
            broken: false,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = MemorySink {
            out_of_bounds: self.out_of_bounds,
            flushes: self.flushes,
            broken: self.broken,
            ..MemorySink::new(width, height)
        };
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    pub fn char_at(&self, x: u16, y: u16) -> char {
        self.cells[self.index(x, y)].0
    }

    pub fn style_at(&self, x: u16, y: u16) -> Style {
        self.cells[self.index(x, y)].1
    }

    /// One row of the grid as text, trailing blanks removed
    pub fn line(&self, y: u16) -> String {
        let row: String = (0..self.width).map(|x| self.char_at(x, y)).collect();
        row.trim_end().to_string()
    }
}

#[cfg(test)]
impl RenderSink for MemorySink {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.cells.fill((' ', Style::default()));
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16), RenderError> {
        if self.broken {
            return Err(RenderError::Size(io::Error::new(
                io::ErrorKind::Other,
                "no terminal",
            )));
        }
        Ok((self.width, self.height))
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x >= self.width || y >= self.height {
            self.out_of_bounds += 1;
            return;
        }
        let index = self.index(x, y);
        self.cells[index] = (ch, style);
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.flushes += 1;
        Ok(())
    }
}
