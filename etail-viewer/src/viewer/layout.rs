//! Layout and pagination engine
//!
//! [`ViewportLayout`] owns all presentation state (scroll offsets, fixed
//! column count, filename toggle, terminal size) and maps that state plus the
//! open files onto the terminal grid. Files are stacked top to bottom, one pane
//! each, all sharing one vertical scroll offset and one horizontal scroll
//! state.
//!
//! Pane layout, top to bottom:
//! - Filename line (optional, full width)
//! - Header row
//! - `rows_per_pane` data rows
//!
//! Every navigation operation changes one piece of state and then redraws the
//! whole grid. Clamping uses the geometry of the previous redraw, which is what
//! the user was looking at when the key was pressed.

use super::sink::{RenderError, RenderSink};
use super::theme::Theme;
use super::ui::{draw_string, put_char};
use etail_config::LayoutConfig;
use etail_table::TabularSource;
use tracing::debug;

/// Fixed layout parameters, normally taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Panes never get shorter than this; extra files are windowed instead
    pub min_pane_height: usize,
    /// Column width cap is terminal width divided by this
    pub column_width_divisor: usize,
    /// Glyph drawn after the last fixed column
    pub separator: char,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            min_pane_height: 5,
            column_width_divisor: 4,
            separator: '|',
        }
    }
}

impl From<&LayoutConfig> for LayoutSettings {
    fn from(config: &LayoutConfig) -> Self {
        LayoutSettings {
            min_pane_height: config.min_pane_height.max(1),
            column_width_divisor: config.column_width_divisor.max(1),
            separator: config.separator,
        }
    }
}

/// Geometry derived at the start of every redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneGeometry {
    /// Lines given to each visible pane
    pub pane_height: usize,
    /// How many files are drawn
    pub visible_file_count: usize,
    /// Index of the first drawn file
    pub first_visible_file: usize,
    /// Data rows shown under each header
    pub rows_per_pane: usize,
    /// No column is drawn wider than this
    pub max_column_width: usize,
}

impl PaneGeometry {
    /// Split a `width` x `height` terminal among `file_count` files.
    ///
    /// Panes share the height evenly. When that would make them shorter than
    /// the minimum, panes get exactly the minimum height and only as many files
    /// as fit are shown, starting at `first_visible` (clamped so the window
    /// never runs past the last file).
    pub fn compute(
        width: usize,
        height: usize,
        file_count: usize,
        first_visible: usize,
        show_filenames: bool,
        settings: &LayoutSettings,
    ) -> PaneGeometry {
        let min_height = settings.min_pane_height.max(1);
        let mut pane_height = height / file_count.max(1);
        let mut visible_file_count = file_count;
        if pane_height < min_height {
            visible_file_count = height / min_height;
            pane_height = min_height;
        }

        let first_visible_file = first_visible.min(file_count.saturating_sub(visible_file_count));

        let mut rows_per_pane = pane_height.saturating_sub(1);
        if show_filenames {
            rows_per_pane = rows_per_pane.saturating_sub(1);
        }

        PaneGeometry {
            pane_height,
            visible_file_count,
            first_visible_file,
            rows_per_pane,
            max_column_width: width / settings.column_width_divisor.max(1),
        }
    }
}

/// Whether column `index` is drawn given the fixed count and scroll offset.
///
/// The first `fixed` columns are always shown; of the rest, only those at or
/// past `fixed + offset` are.
pub fn column_visible(index: usize, fixed: usize, offset: usize) -> bool {
    index < fixed || index >= fixed + offset
}

/// Presentation state and the redraw algorithm
#[derive(Debug, Clone)]
pub struct ViewportLayout {
    settings: LayoutSettings,
    theme: Theme,
    /// `(width, height)` read at the last redraw
    terminal_size: (usize, usize),
    /// Leading columns pinned at the left of every pane
    fixed_columns: usize,
    /// Non-fixed columns scrolled off to the left
    column_offset: usize,
    /// First data row shown, shared by every pane
    row_offset: usize,
    /// Requested start of the file window
    first_visible_file: usize,
    show_filenames: bool,
    /// Derived at the last redraw
    geometry: PaneGeometry,
    /// Longest file among the panes drawn at the last redraw
    max_row_count: usize,
}

impl ViewportLayout {
    pub fn new(settings: LayoutSettings) -> Self {
        ViewportLayout {
            settings,
            theme: Theme::default(),
            terminal_size: (0, 0),
            fixed_columns: 0,
            column_offset: 0,
            row_offset: 0,
            first_visible_file: 0,
            show_filenames: false,
            geometry: PaneGeometry::default(),
            max_row_count: 0,
        }
    }

    /// Start with the filename line shown or hidden
    pub fn with_filenames(mut self, show: bool) -> Self {
        self.show_filenames = show;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Largest row offset that still fills the longest visible pane.
    ///
    /// Row counts are read from `files` as they are now, so a file that grew
    /// on disk since the last redraw is paged against its new length.
    fn last_page_offset(&self, files: &[TabularSource]) -> usize {
        files
            .iter()
            .skip(self.geometry.first_visible_file)
            .take(self.geometry.visible_file_count)
            .map(TabularSource::row_count)
            .max()
            .unwrap_or(0)
            .saturating_sub(self.geometry.rows_per_pane)
    }

    /// Recompute geometry and draw every visible pane.
    pub fn redraw<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        sink.clear()?;
        let (width, height) = sink.size()?;
        self.terminal_size = (usize::from(width), usize::from(height));

        if files.is_empty() {
            return Err(RenderError::NoFiles);
        }

        self.geometry = PaneGeometry::compute(
            self.terminal_size.0,
            self.terminal_size.1,
            files.len(),
            self.first_visible_file,
            self.show_filenames,
            &self.settings,
        );
        self.first_visible_file = self.geometry.first_visible_file;

        let mut top = 0;
        let mut max_row_count = 0;
        for file in files
            .iter()
            .skip(self.geometry.first_visible_file)
            .take(self.geometry.visible_file_count)
        {
            self.draw_file(file, top, sink);
            top += self.geometry.pane_height;
            max_row_count = max_row_count.max(file.row_count());
        }
        self.max_row_count = max_row_count;

        debug!(
            width,
            height,
            pane_height = self.geometry.pane_height,
            visible = self.geometry.visible_file_count,
            first = self.geometry.first_visible_file,
            rows_per_pane = self.geometry.rows_per_pane,
            row_offset = self.row_offset,
            max_rows = self.max_row_count,
            "redraw"
        );
        sink.flush()
    }

    /// Draw one file's pane with its top line at `top`
    fn draw_file<S: RenderSink>(&self, file: &TabularSource, top: usize, sink: &mut S) {
        let bounds = self.terminal_size;
        let rows_per_pane = self.geometry.rows_per_pane;
        let mut header_y = top;

        if self.show_filenames {
            draw_string(
                sink,
                bounds,
                0,
                header_y,
                &file.display_name(),
                bounds.0,
                self.theme.filename(),
            );
            header_y += 1;
        }

        let mut x = 0;
        for (column, label) in file.headers().iter().enumerate() {
            if !column_visible(column, self.fixed_columns, self.column_offset) {
                continue;
            }
            let width = file
                .column_widths()
                .get(column)
                .copied()
                .unwrap_or(0)
                .min(self.geometry.max_column_width);

            draw_string(sink, bounds, x, header_y, label, width, self.theme.header());

            let at_fixed_boundary = column + 1 == self.fixed_columns;
            if at_fixed_boundary {
                for line in 0..=rows_per_pane {
                    put_char(
                        sink,
                        bounds,
                        x + width + 1,
                        header_y + line,
                        self.settings.separator,
                        self.theme.separator(),
                    );
                }
            }

            for line in 0..rows_per_pane {
                let Some(value) = file.cell(self.row_offset + line, column) else {
                    break;
                };
                draw_string(
                    sink,
                    bounds,
                    x,
                    header_y + 1 + line,
                    value,
                    width,
                    self.theme.data(),
                );
            }

            x += width + 1;
            if at_fixed_boundary {
                x += 2;
            }
            if x >= bounds.0 {
                break;
            }
        }
    }

    /// Advance one page, stopping at the last full page of the longest file
    pub fn next_page<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.row_offset =
            (self.row_offset + self.geometry.rows_per_pane).min(self.last_page_offset(files));
        self.redraw(files, sink)
    }

    pub fn prev_page<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.row_offset = self
            .row_offset
            .saturating_sub(self.geometry.rows_per_pane)
            .min(self.last_page_offset(files));
        self.redraw(files, sink)
    }

    pub fn top<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.row_offset = 0;
        self.redraw(files, sink)
    }

    pub fn end<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.row_offset = self.last_page_offset(files);
        self.redraw(files, sink)
    }

    /// Scroll non-fixed columns one to the left. Unbounded: past the last
    /// column the panes are simply empty.
    pub fn scroll_right<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.column_offset += 1;
        self.redraw(files, sink)
    }

    pub fn scroll_left<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.column_offset = self.column_offset.saturating_sub(1);
        self.redraw(files, sink)
    }

    /// Pin one more leading column. Unbounded, like `scroll_right`.
    pub fn fix_right<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.fixed_columns += 1;
        self.redraw(files, sink)
    }

    pub fn fix_left<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.fixed_columns = self.fixed_columns.saturating_sub(1);
        self.redraw(files, sink)
    }

    pub fn toggle_filenames<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.show_filenames = !self.show_filenames;
        self.redraw(files, sink)
    }

    /// Slide the file window down by one file (clamped by the redraw)
    pub fn next_files<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.first_visible_file += 1;
        self.redraw(files, sink)
    }

    pub fn prev_files<S: RenderSink>(
        &mut self,
        files: &[TabularSource],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        self.first_visible_file = self.first_visible_file.saturating_sub(1);
        self.redraw(files, sink)
    }
}

#[cfg(test)]
impl ViewportLayout {
    pub fn terminal_size(&self) -> (usize, usize) {
        self.terminal_size
    }

    pub fn fixed_columns(&self) -> usize {
        self.fixed_columns
    }

    pub fn column_offset(&self) -> usize {
        self.column_offset
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn first_visible_file(&self) -> usize {
        self.first_visible_file
    }

    pub fn show_filenames(&self) -> bool {
        self.show_filenames
    }

    pub fn geometry(&self) -> PaneGeometry {
        self.geometry
    }

    pub fn max_row_count(&self) -> usize {
        self.max_row_count
    }
}

impl Default for ViewportLayout {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}
