//! Low-level drawing helpers and the help screen
//!
//! Every write to a sink goes through [`put_char`], which drops coordinates
//! outside the current terminal size before they reach the sink.

use super::sink::{RenderError, RenderSink};
use super::theme::Theme;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Lines of the help screen, key column then description
const HELP_LINES: &[(&str, &str)] = &[
    ("Esc, q", "quit"),
    ("space, n, Down, PgDn", "next page"),
    ("p, Up, PgUp", "previous page"),
    ("r, f, Right", "scroll columns right"),
    ("l, b, Left", "scroll columns left"),
    ("a, Home", "top"),
    ("e, End", "end"),
    ("w", "fix one more leading column"),
    ("s", "fix one less leading column"),
    ("d", "toggle file names"),
    ("Tab, ]", "show next file (when not all fit)"),
    ("BackTab, [", "show previous file"),
    ("h", "this help"),
];

const HELP_TITLE: &str = "etail: split-screen viewer for delimited files";
const HELP_FOOTER: &str = "press any key to return";

/// Paint one glyph if `(x, y)` lies inside `bounds`
pub fn put_char<S: RenderSink>(
    sink: &mut S,
    bounds: (usize, usize),
    x: usize,
    y: usize,
    ch: char,
    style: Style,
) {
    let (width, height) = bounds;
    if x >= width || y >= height {
        return;
    }
    // bounds come from the sink's u16 size, so both fit
    if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
        sink.set_cell(x, y, ch, style);
    }
}

/// Draw `text` starting at `(x, y)`, clipped to `max_width` cells.
///
/// Wide characters take two cells and are dropped rather than split at the
/// clip edge or the right edge of the terminal. Zero-width and control characters are skipped.
pub fn draw_string<S: RenderSink>(
    sink: &mut S,
    bounds: (usize, usize),
    x: usize,
    y: usize,
    text: &str,
    max_width: usize,
    style: Style,
) {
    if y >= bounds.1 {
        return;
    }
    let mut offset = 0;
    for ch in text.chars() {
        let width = match ch.width() {
            Some(width) if width > 0 => width,
            _ => continue,
        };
        if offset + width > max_width || x + offset + width > bounds.0 {
            break;
        }
        put_char(sink, bounds, x + offset, y, ch, style);
        offset += width;
    }
}

/// Replace the grid with the key binding summary
pub fn render_help<S: RenderSink>(sink: &mut S, theme: &Theme) -> Result<(), RenderError> {
    sink.clear()?;
    let (width, height) = sink.size()?;
    let bounds = (usize::from(width), usize::from(height));

    draw_string(sink, bounds, 0, 0, HELP_TITLE, bounds.0, theme.help_title());
    let key_width = HELP_LINES
        .iter()
        .map(|(keys, _)| keys.len())
        .max()
        .unwrap_or(0);
    for (row, (keys, action)) in HELP_LINES.iter().enumerate() {
        let line = format!("  {keys:<key_width$}  {action}");
        draw_string(sink, bounds, 0, row + 2, &line, bounds.0, theme.help_text());
    }
    draw_string(
        sink,
        bounds,
        0,
        HELP_LINES.len() + 3,
        HELP_FOOTER,
        bounds.0,
        theme.help_text(),
    );
    sink.flush()
}
