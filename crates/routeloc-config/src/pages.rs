//! Per-page route overrides (`[pages]` section).
//!
//! Each key is a page name as produced by the host's page discovery. The
//! value is either `false`, which removes the page from localization, or a
//! table of locale code to custom path:
//!
//! ```toml
//! [pages]
//! admin = false
//!
//! [pages.about]
//! fr = "/a-propos"
//! de = "/ueber-uns"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

/// Override declared for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PageOverrideRaw")]
pub enum PageOverride {
    /// `name = false`: never localize this page.
    Excluded,
    /// Locale code to custom path.
    Paths(BTreeMap<String, String>),
}

/// TOML shape before the boolean is checked.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageOverrideRaw {
    Flag(bool),
    Paths(BTreeMap<String, String>),
}

impl TryFrom<PageOverrideRaw> for PageOverride {
    type Error = String;

    fn try_from(raw: PageOverrideRaw) -> Result<Self, Self::Error> {
        match raw {
            PageOverrideRaw::Flag(false) => Ok(Self::Excluded),
            PageOverrideRaw::Flag(true) => Err(
                "page override must be `false` or a table of locale paths, got `true`".to_owned(),
            ),
            PageOverrideRaw::Paths(paths) => Ok(Self::Paths(paths)),
        }
    }
}

/// The `[pages]` table, keyed by page name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PagesConfig(BTreeMap<String, PageOverride>);

impl PagesConfig {
    /// Look up the override for a page name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PageOverride> {
        self.0.get(name)
    }

    /// Iterate over `(page name, override)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageOverride)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Insert or replace an override.
    pub fn insert(&mut self, name: impl Into<String>, entry: PageOverride) {
        self.0.insert(name.into(), entry);
    }

    /// Number of configured pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no page has an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PageOverride)> for PagesConfig {
    fn from_iter<T: IntoIterator<Item = (String, PageOverride)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
