//! One loaded tabular file
//!
//! The first line of a file holds the header labels; every following line is a
//! data row. Rows may be ragged: extra fields are kept, missing fields are just
//! absent. Column widths cover the header columns only and track the widest
//! value seen in each one, header included.

use super::delimiter::Delimiter;
use super::error::FileError;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// A delimited text file parsed into headers, rows and fitted column widths
#[derive(Debug, Clone)]
pub struct TabularSource {
    /// Location of the file, as given on the command line
    path: PathBuf,
    /// Modification time recorded at the last successful load
    modified: SystemTime,
    /// Delimiter decided from the first line ever seen; `None` until then
    delimiter: Option<Delimiter>,
    /// Header labels, one per column
    headers: Vec<String>,
    /// Data rows (header excluded)
    rows: Vec<Vec<String>>,
    /// Widest display width seen per header column
    column_widths: Vec<usize>,
}

/// Result of parsing a full set of lines, committed to a source in one step
struct Parsed {
    delimiter: Option<Delimiter>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Parsed {
    fn from_lines<'a, I>(lines: I, known: Option<Delimiter>) -> Parsed
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lines = lines.into_iter();
        let Some(first) = lines.next() else {
            return Parsed {
                delimiter: known,
                headers: Vec::new(),
                rows: Vec::new(),
                column_widths: Vec::new(),
            };
        };

        let delimiter = known.unwrap_or_else(|| Delimiter::detect(first));
        let headers = delimiter.split(first);
        let mut column_widths = vec![0; headers.len()];
        fit_widths(&mut column_widths, &headers);

        let mut rows = Vec::new();
        for line in lines {
            let fields = delimiter.split(line);
            fit_widths(&mut column_widths, &fields);
            rows.push(fields);
        }

        Parsed {
            delimiter: Some(delimiter),
            headers,
            rows,
            column_widths,
        }
    }
}

/// Widen each header column to fit the given fields. Fields past the header
/// range are ignored.
fn fit_widths(widths: &mut [usize], fields: &[String]) {
    for (width, field) in widths.iter_mut().zip(fields) {
        *width = (*width).max(field.width());
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, FileError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| FileError::Stat {
            path: path.to_path_buf(),
            source,
        })
}

fn read_lines(path: &Path) -> Result<Vec<String>, FileError> {
    let file = File::open(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for chunk in BufReader::new(file).split(b'\n') {
        let bytes = chunk.map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = String::from_utf8_lossy(&bytes);
        lines.push(line.trim_end_matches('\r').to_string());
    }
    Ok(lines)
}

impl TabularSource {
    /// Open and parse the file at `path`
    ///
    /// Fails if the file cannot be statted, opened or read. Nothing partial is
    /// returned on failure.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let mut source = TabularSource {
            path: path.into(),
            modified: SystemTime::UNIX_EPOCH,
            delimiter: None,
            headers: Vec::new(),
            rows: Vec::new(),
            column_widths: Vec::new(),
        };
        source.read()?;
        debug!(
            path = %source.path.display(),
            rows = source.row_count(),
            columns = source.column_count(),
            "loaded tabular source"
        );
        Ok(source)
    }

    /// Build a source from in-memory lines, without touching the filesystem
    pub fn from_lines<'a, I>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parsed = Parsed::from_lines(lines, None);
        TabularSource {
            path: path.into(),
            modified: SystemTime::UNIX_EPOCH,
            delimiter: parsed.delimiter,
            headers: parsed.headers,
            rows: parsed.rows,
            column_widths: parsed.column_widths,
        }
    }

    /// Re-read the file if it changed on disk since the last load.
    ///
    /// Returns whether a reload happened. Any failure leaves the current
    /// content in place and reports `false`.
    pub fn check_and_reload(&mut self) -> bool {
        match self.reload_status() {
            Ok(reloaded) => reloaded,
            Err(err) => {
                debug!(error = %err, "reload failed, keeping previous content");
                false
            }
        }
    }

    /// Like [`TabularSource::check_and_reload`], but reports failures.
    pub fn reload_status(&mut self) -> Result<bool, FileError> {
        let modified = modified_time(&self.path)?;
        if modified <= self.modified {
            return Ok(false);
        }
        self.read()?;
        debug!(
            path = %self.path.display(),
            rows = self.row_count(),
            "reloaded tabular source"
        );
        Ok(true)
    }

    /// Stat, read and parse the file, replacing all content only on success
    fn read(&mut self) -> Result<(), FileError> {
        let modified = modified_time(&self.path)?;
        let lines = read_lines(&self.path)?;
        let parsed = Parsed::from_lines(lines.iter().map(String::as_str), self.delimiter);

        self.modified = modified;
        self.delimiter = parsed.delimiter;
        self.headers = parsed.headers;
        self.rows = parsed.rows;
        self.column_widths = parsed.column_widths;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name shown in the filename header line
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Modification time recorded at the last successful load
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// The delimiter in use, once a first line has been seen
    pub fn delimiter(&self) -> Option<Delimiter> {
        self.delimiter
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Field at `(row, column)`, or `None` if the row is short or missing
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|fields| fields.get(column))
            .map(String::as_str)
    }

    /// Fitted display width of each header column
    pub fn column_widths(&self) -> &[usize] {
        &self.column_widths
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_headers_and_rows() {
        let source = TabularSource::from_lines("t.csv", ["name,age", "ann,31", "bob,4"]);
        assert_eq!(source.headers(), &["name", "age"]);
        assert_eq!(source.row_count(), 2);
        assert_eq!(source.cell(1, 0), Some("bob"));
        assert_eq!(source.delimiter(), Some(Delimiter::Comma));
    }

    #[test]
    fn test_widths_fit_widest_value() {
        let source = TabularSource::from_lines("t.csv", ["a,bb", "cccc,d", "e,f"]);
        assert_eq!(source.column_widths(), &[4, 2]);
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let source = TabularSource::from_lines("t.tsv", ["a\tb", "1\t2\t3\t4", "5"]);
        assert_eq!(source.column_count(), 2);
        assert_eq!(source.column_widths().len(), 2);
        assert_eq!(source.row(0).map(<[String]>::len), Some(4));
        assert_eq!(source.cell(0, 3), Some("4"));
        assert_eq!(source.cell(1, 1), None);
    }

    #[test]
    fn test_extra_fields_do_not_widen() {
        let source = TabularSource::from_lines("t.csv", ["a,b", "1,2,a-very-long-extra-field"]);
        assert_eq!(source.delimiter(), Some(Delimiter::Comma));
        assert_eq!(source.column_widths(), &[1, 1]);
        assert_eq!(source.cell(0, 2), Some("a-very-long-extra-field"));
    }

    #[test]
    fn test_extra_whitespace_fields_do_not_widen() {
        let source = TabularSource::from_lines("t.dat", ["a b", "1 22 333333", "4"]);
        assert_eq!(source.delimiter(), Some(Delimiter::Whitespace));
        assert_eq!(source.column_widths(), &[1, 2]);
        assert_eq!(source.row(0).map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_empty_input() {
        let source = TabularSource::from_lines("empty.csv", std::iter::empty::<&str>());
        assert_eq!(source.column_count(), 0);
        assert_eq!(source.row_count(), 0);
        assert_eq!(source.delimiter(), None);
    }

    #[test]
    fn test_whitespace_header_applies_to_rows() {
        let source = TabularSource::from_lines("t.dat", ["x  y", "1,2 3"]);
        assert_eq!(source.delimiter(), Some(Delimiter::Whitespace));
        assert_eq!(source.row(0), Some(&["1,2".to_string(), "3".to_string()][..]));
    }

    #[test]
    fn test_widths_use_display_cells() {
        let source = TabularSource::from_lines("t.csv", ["k", "日本"]);
        assert_eq!(source.column_widths(), &[4]);
    }

    proptest! {
        #[test]
        fn prop_widths_cover_headers(
            header in proptest::collection::vec("[a-z]{0,8}", 1..6),
            rows in proptest::collection::vec(proptest::collection::vec("[a-z0-9]{0,12}", 0..8), 0..10),
        ) {
            let mut lines = vec![header.join(",")];
            lines.extend(rows.iter().map(|row| row.join(",")));
            let source = TabularSource::from_lines("p.csv", lines.iter().map(String::as_str));

            prop_assert_eq!(source.column_widths().len(), source.headers().len());
            for (width, label) in source.column_widths().iter().zip(source.headers()) {
                prop_assert!(*width >= label.len());
            }
            for row in source.rows() {
                for (width, field) in source.column_widths().iter().zip(row) {
                    prop_assert!(*width >= field.len());
                }
            }
        }
    }
}
