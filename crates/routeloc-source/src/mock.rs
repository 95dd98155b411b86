//! Mock page source for testing.
//!
//! Provides [`MockPageSource`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::source::{PageSource, SourceError, SourceErrorKind};

/// In-memory page source.
///
/// Every `read` call is recorded so tests can assert how often and in which
/// order sources were consulted.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use routeloc_source::{MockPageSource, PageSource};
///
/// let source = MockPageSource::new()
///     .with_file("pages/about.vue", "---\nlocaleRoutes:\n  fr: /a-propos\n---\n");
///
/// let text = source.read(Path::new("pages/about.vue")).unwrap();
/// assert_eq!(source.reads(), vec![Path::new("pages/about.vue").to_path_buf()]);
/// ```
#[derive(Debug, Default)]
pub struct MockPageSource {
    files: HashMap<PathBuf, String>,
    unreadable: HashSet<PathBuf>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockPageSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Make reads of `path` fail with a permission error.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    /// Paths read so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl PageSource for MockPageSource {
    fn read(&self, file: &Path) -> Result<String, SourceError> {
        self.reads.lock().unwrap().push(file.to_path_buf());

        if self.unreadable.contains(file) {
            return Err(SourceError::new(SourceErrorKind::PermissionDenied)
                .with_path(file)
                .with_backend("Mock"));
        }
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| SourceError::not_found(file).with_backend("Mock"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_registered_file() {
        let source = MockPageSource::new().with_file("a.vue", "A");
        assert_eq!(source.read(Path::new("a.vue")).unwrap(), "A");
    }

    #[test]
    fn test_read_missing_file() {
        let source = MockPageSource::new();
        let err = source.read(Path::new("a.vue")).unwrap_err();
        assert_eq!(err.kind(), &SourceErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_unreadable_file() {
        let source = MockPageSource::new()
            .with_file("a.vue", "A")
            .with_unreadable("a.vue");
        let err = source.read(Path::new("a.vue")).unwrap_err();
        assert_eq!(err.kind(), &SourceErrorKind::PermissionDenied);
    }

    #[test]
    fn test_reads_are_recorded_in_order() {
        let source = MockPageSource::new().with_file("a.vue", "A").with_file("b.vue", "B");
        source.read(Path::new("b.vue")).unwrap();
        source.read(Path::new("a.vue")).unwrap();
        let _ = source.read(Path::new("c.vue"));

        assert_eq!(
            source.reads(),
            vec![
                PathBuf::from("b.vue"),
                PathBuf::from("a.vue"),
                PathBuf::from("c.vue")
            ]
        );
    }
}
