//! Page source trait and error types.
//!
//! `file` arguments are the references carried by route tree nodes: either
//! absolute paths or paths relative to the source's root directory.

use std::path::{Path, PathBuf};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// File does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path escapes the root directory.
    InvalidPath,
    /// File is not valid UTF-8.
    InvalidEncoding,
    /// Other/unknown error category.
    Other,
}

/// Error reading a page source, with path and backend context.
#[derive(Debug)]
pub struct SourceError {
    /// Semantic error category.
    pub kind: SourceErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_path(path)
    }

    /// Create a source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: &Path) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => SourceErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => SourceErrorKind::InvalidEncoding,
            _ => SourceErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> &SourceErrorKind {
        &self.kind
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            SourceErrorKind::NotFound => "Not found",
            SourceErrorKind::PermissionDenied => "Permission denied",
            SourceErrorKind::InvalidPath => "Invalid path",
            SourceErrorKind::InvalidEncoding => "Invalid encoding",
            SourceErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to page source files.
///
/// Called once per page that carries a `file`, during the indexing pass only.
pub trait PageSource: Send + Sync {
    /// Read the full text of a page's source file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file doesn't exist or can't be read.
    fn read(&self, file: &Path) -> Result<String, SourceError>;

    /// Path handed to extractors for diagnostics.
    ///
    /// Defaults to the reference unchanged.
    fn resolve(&self, file: &Path) -> PathBuf {
        file.to_path_buf()
    }
}
