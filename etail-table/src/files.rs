//! The ordered set of open files

use super::error::FileError;
use super::source::TabularSource;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Files the viewer has open, in command-line order
///
/// Owned by the event loop for the life of the process. Files that fail to
/// load are never part of the set.
#[derive(Debug, Clone, Default)]
pub struct OpenFiles {
    files: Vec<TabularSource>,
}

impl OpenFiles {
    pub fn new(files: Vec<TabularSource>) -> Self {
        OpenFiles { files }
    }

    /// Load every path, skipping the ones that fail.
    ///
    /// Failures are returned alongside the set so the caller can report them;
    /// they never abort loading of the remaining paths.
    pub fn open_all<I, P>(paths: I) -> (OpenFiles, Vec<FileError>)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut files = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            match TabularSource::load(path) {
                Ok(source) => files.push(source),
                Err(err) => {
                    warn!(error = %err, "skipping file");
                    errors.push(err);
                }
            }
        }
        (OpenFiles { files }, errors)
    }

    /// Reload every file that changed on disk. Returns true if any did.
    pub fn check_updates(&mut self) -> bool {
        let mut reloaded = false;
        for file in &mut self.files {
            if file.check_and_reload() {
                reloaded = true;
            }
        }
        if reloaded {
            debug!("open files changed on disk");
        }
        reloaded
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TabularSource> {
        self.files.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TabularSource> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[TabularSource] {
        &self.files
    }
}

impl<'a> IntoIterator for &'a OpenFiles {
    type Item = &'a TabularSource;
    type IntoIter = std::slice::Iter<'a, TabularSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
