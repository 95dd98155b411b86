//! Global per-page override table.

use std::collections::HashMap;

use routeloc_config::{PageOverride, PagesConfig};
use routeloc_source::LocaleRoutes;

/// How a page is treated, as decided by the global override table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOverride {
    /// Page is left out of localization entirely.
    Excluded,
    /// Page uses these per-locale paths.
    CustomPaths(LocaleRoutes),
    /// No global entry; default prefixing applies.
    Absent,
}

static ABSENT: RouteOverride = RouteOverride::Absent;

/// Page name to [`RouteOverride`].
#[derive(Clone, Debug, Default)]
pub struct OverrideTable {
    entries: HashMap<String, RouteOverride>,
}

impl OverrideTable {
    /// Empty table: every page is [`RouteOverride::Absent`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Inserting [`RouteOverride::Absent`] removes the name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, entry: RouteOverride) -> Self {
        let name = name.into();
        if entry == RouteOverride::Absent {
            self.entries.remove(&name);
        } else {
            self.entries.insert(name, entry);
        }
        self
    }

    /// Build the table from the `[pages]` configuration section.
    #[must_use]
    pub fn from_config(pages: &PagesConfig) -> Self {
        let entries = pages
            .iter()
            .map(|(name, entry)| {
                let entry = match entry {
                    PageOverride::Excluded => RouteOverride::Excluded,
                    PageOverride::Paths(paths) => RouteOverride::CustomPaths(paths.clone()),
                };
                (name.to_owned(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Entry for a page. Unnamed pages are always [`RouteOverride::Absent`].
    #[must_use]
    pub fn lookup(&self, name: Option<&str>) -> &RouteOverride {
        name.and_then(|n| self.entries.get(n)).unwrap_or(&ABSENT)
    }

    /// Whether the page is excluded from localization.
    #[must_use]
    pub fn is_excluded(&self, name: Option<&str>) -> bool {
        matches!(self.lookup(name), RouteOverride::Excluded)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no page has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
