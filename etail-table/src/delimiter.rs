//! Field delimiter detection and splitting

/// How the fields of every line in a source are separated
///
/// Detected once from the first line of a file and then applied to every
/// line of that file, reloads included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Fields separated by `,` (no quoting rules)
    Comma,
    /// Fields separated by runs of whitespace
    #[default]
    Whitespace,
}

impl Delimiter {
    /// Decide the delimiter from the first line of a file.
    ///
    /// Comma wins when the line has more commas than tabs, or when splitting
    /// on whitespace yields no fields at all.
    pub fn detect(first_line: &str) -> Delimiter {
        let commas = first_line.matches(',').count();
        let tabs = first_line.matches('\t').count();
        if commas > tabs || first_line.split_whitespace().next().is_none() {
            Delimiter::Comma
        } else {
            Delimiter::Whitespace
        }
    }

    /// Split one line into its fields
    pub fn split(&self, line: &str) -> Vec<String> {
        match self {
            Delimiter::Comma => line.split(',').map(str::to_string).collect(),
            Delimiter::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        }
    }
}
