//! Page source access for routeloc.
//!
//! The localization engine never touches the filesystem itself. It asks a
//! [`PageSource`] for the text of a page's source file and hands that text
//! to a [`PageConfigExtractor`], which returns the locale routes embedded in
//! the page (if any).
//!
//! The crate provides:
//! - [`PageSource`] trait with [`FsPageSource`] for filesystem-backed pages
//! - [`PageConfigExtractor`] trait with [`EmbeddedConfigExtractor`], which
//!   reads YAML front matter or an `<i18n-routes>` block
//! - [`MockPageSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use routeloc_source::{EmbeddedConfigExtractor, FsPageSource, PageConfigExtractor, PageSource};
//!
//! let source = FsPageSource::new(PathBuf::from("app"));
//! let text = source.read(Path::new("pages/about.vue"))?;
//! let config = EmbeddedConfigExtractor::new().extract(&text, Path::new("pages/about.vue"))?;
//! ```

mod extract;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use extract::{EmbeddedConfigExtractor, ExtractError, LocaleRoutes, PageConfig, PageConfigExtractor};
pub use fs::FsPageSource;
#[cfg(feature = "mock")]
pub use mock::MockPageSource;
pub use source::{PageSource, SourceError, SourceErrorKind};
