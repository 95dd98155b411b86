//! Override indexing.
//!
//! Builds the [`LocalizedPathIndex`]: every page's normalized full path
//! mapped to its per-locale custom paths. The index is keyed on the paths
//! as they are *before* localization, so it must be complete before the
//! localizer rewrites anything.

use std::collections::BTreeMap;

use routeloc_source::{
    ExtractError, LocaleRoutes, PageConfigExtractor, PageSource, SourceError,
};

use crate::overrides::{OverrideTable, RouteOverride};
use crate::page::PageNode;
use crate::paths;

/// Normalized full path to per-locale custom paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalizedPathIndex {
    paths: BTreeMap<String, LocaleRoutes>,
}

impl LocalizedPathIndex {
    /// Custom paths recorded for a full path.
    #[must_use]
    pub fn get(&self, full_path: &str) -> Option<&LocaleRoutes> {
        self.paths.get(full_path)
    }

    /// Custom path for one locale at a full path.
    #[must_use]
    pub fn custom_path(&self, full_path: &str, locale: &str) -> Option<&str> {
        self.get(full_path)?.get(locale).map(String::as_str)
    }

    /// Iterate over `(full path, custom paths)` in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocaleRoutes)> {
        self.paths.iter().map(|(path, routes)| (path.as_str(), routes))
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when no page has custom paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn insert(&mut self, full_path: String, routes: LocaleRoutes) {
        if !routes.is_empty() {
            self.paths.insert(full_path, routes);
        }
    }
}

impl FromIterator<(String, LocaleRoutes)> for LocalizedPathIndex {
    fn from_iter<T: IntoIterator<Item = (String, LocaleRoutes)>>(iter: T) -> Self {
        let mut index = Self::default();
        for (path, routes) in iter {
            index.insert(paths::normalize(&path), routes);
        }
        index
    }
}

/// Error building the index. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The page's source file could not be read.
    #[error("Failed to read source of page {page}: {source}")]
    Read {
        /// Full path of the page.
        page: String,
        /// Underlying source error.
        #[source]
        source: SourceError,
    },
    /// The page's embedded configuration is malformed.
    #[error("Failed to extract config of page {page}: {source}")]
    Extract {
        /// Full path of the page.
        page: String,
        /// Underlying extraction error.
        #[source]
        source: ExtractError,
    },
}

/// Builds a [`LocalizedPathIndex`] from the global override table and the
/// configuration embedded in page sources.
pub struct OverrideIndexer<'a> {
    overrides: &'a OverrideTable,
    source: &'a dyn PageSource,
    extractor: &'a dyn PageConfigExtractor,
}

impl<'a> OverrideIndexer<'a> {
    /// Create an indexer.
    #[must_use]
    pub fn new(
        overrides: &'a OverrideTable,
        source: &'a dyn PageSource,
        extractor: &'a dyn PageConfigExtractor,
    ) -> Self {
        Self {
            overrides,
            source,
            extractor,
        }
    }

    /// Index the whole tree, depth-first.
    ///
    /// A global [`RouteOverride::CustomPaths`] entry wins: the page source is
    /// not read at all. Otherwise pages with a `file` are read and passed to
    /// the extractor.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] on the first unreadable or malformed page
    /// source; no partial index is returned.
    pub fn index(&self, tree: &[PageNode]) -> Result<LocalizedPathIndex, IndexError> {
        let mut index = LocalizedPathIndex::default();
        self.index_level(tree, "", &mut index)?;
        tracing::debug!(indexed = index.len(), "Override index built");
        Ok(index)
    }

    fn index_level(
        &self,
        pages: &[PageNode],
        parent_path: &str,
        index: &mut LocalizedPathIndex,
    ) -> Result<(), IndexError> {
        for page in pages {
            let full_path = paths::join(parent_path, &page.path);

            if let RouteOverride::CustomPaths(routes) = self.overrides.lookup(page.name.as_deref()) {
                index.insert(full_path.clone(), routes.clone());
            } else if let Some(routes) = self.embedded_routes(page, &full_path)? {
                index.insert(full_path.clone(), routes);
            }

            self.index_level(&page.children, &full_path, index)?;
        }
        Ok(())
    }

    fn embedded_routes(
        &self,
        page: &PageNode,
        full_path: &str,
    ) -> Result<Option<LocaleRoutes>, IndexError> {
        let Some(file) = &page.file else {
            return Ok(None);
        };

        let contents = self.source.read(file).map_err(|source| IndexError::Read {
            page: full_path.to_owned(),
            source,
        })?;
        let config = self
            .extractor
            .extract(&contents, &self.source.resolve(file))
            .map_err(|source| IndexError::Extract {
                page: full_path.to_owned(),
                source,
            })?;

        Ok(config.and_then(|c| c.locale_routes))
    }
}
