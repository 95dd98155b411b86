//! Filesystem page source.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::source::{PageSource, SourceError, SourceErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Reads page sources from the local filesystem.
///
/// Relative `file` references are resolved against `root_dir`; absolute
/// references (as emitted by most page discovery steps) are read as-is.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use routeloc_source::{FsPageSource, PageSource};
///
/// let source = FsPageSource::new(PathBuf::from("app"));
/// let text = source.read(Path::new("pages/index.vue"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsPageSource {
    root_dir: PathBuf,
}

impl FsPageSource {
    /// Create a filesystem source rooted at `root_dir`.
    #[must_use]
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    /// Root directory relative references are resolved against.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Reject relative references that climb out of the root (`../x`).
    fn validate_path(file: &Path) -> Result<(), SourceError> {
        if file.is_absolute() {
            return Ok(());
        }
        if file.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(SourceError::new(SourceErrorKind::InvalidPath)
                .with_path(file)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl PageSource for FsPageSource {
    fn read(&self, file: &Path) -> Result<String, SourceError> {
        Self::validate_path(file)?;
        let full_path = self.resolve(file);
        fs::read_to_string(&full_path)
            .map_err(|e| SourceError::io(e, &full_path).with_backend(BACKEND))
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root_dir.join(file)
        }
    }
}
