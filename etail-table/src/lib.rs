//! Delimited tabular file loading for etail.
//!
//! A [`TabularSource`] owns one file's parsed content: the header labels, the
//! data rows, and the per-column display widths fitted to the widest value seen
//! in each column. Sources know nothing about terminal geometry; the viewer
//! decides what to show.
//!
//! [`OpenFiles`] is the ordered set of sources the process keeps open for its
//! whole lifetime.

mod delimiter;
mod error;
mod files;
mod source;

pub use delimiter::Delimiter;
pub use error::FileError;
pub use files::OpenFiles;
pub use source::TabularSource;
