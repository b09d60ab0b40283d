//! Error types for file loading

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while opening, statting or reading a tabular file
#[derive(Debug)]
pub enum FileError {
    /// The file could not be opened
    Open { path: PathBuf, source: io::Error },
    /// The modification time could not be read
    Stat { path: PathBuf, source: io::Error },
    /// A line could not be read after opening
    Read { path: PathBuf, source: io::Error },
}

impl FileError {
    /// The path the failing operation was working on
    pub fn path(&self) -> &PathBuf {
        match self {
            FileError::Open { path, .. }
            | FileError::Stat { path, .. }
            | FileError::Read { path, .. } => path,
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Open { path, source } => {
                write!(f, "cannot open {}: {}", path.display(), source)
            }
            FileError::Stat { path, source } => {
                write!(f, "cannot stat {}: {}", path.display(), source)
            }
            FileError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Open { source, .. }
            | FileError::Stat { source, .. }
            | FileError::Read { source, .. } => Some(source),
        }
    }
}
