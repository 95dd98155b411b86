//! Embedded locale-route extraction.
//!
//! A page may declare its own per-locale paths inside its source file. Two
//! embeddings are recognised by [`EmbeddedConfigExtractor`]:
//!
//! YAML front matter at the very top of the file:
//!
//! ```text
//! ---
//! localeRoutes:
//!   fr: /a-propos
//!   de: /ueber-uns
//! ---
//! ```
//!
//! or a custom single-file-component block anywhere in the file:
//!
//! ```text
//! <i18n-routes>
//! localeRoutes:
//!   fr: /a-propos
//! </i18n-routes>
//! ```
//!
//! The block body is parsed as YAML, so JSON bodies work as well.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Locale code to custom path.
pub type LocaleRoutes = BTreeMap<String, String>;

/// Page-level configuration embedded in a page source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageConfig {
    /// Per-locale custom paths declared by the page.
    #[serde(default, rename = "localeRoutes", alias = "locale_routes")]
    pub locale_routes: Option<LocaleRoutes>,
}

/// Error returned when an embedded configuration is present but malformed.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The embedded block is not valid YAML or has the wrong shape.
    #[error("Invalid page config in {}: {message}", path.display())]
    Parse {
        /// Page source path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Front matter opened with `---` but never closed.
    #[error("Unterminated front matter in {}", .0.display())]
    Unterminated(PathBuf),
}

/// Extracts a [`PageConfig`] from page source text.
pub trait PageConfigExtractor: Send + Sync {
    /// Extract the embedded configuration.
    ///
    /// Returns `Ok(None)` when the page embeds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] when an embedded block exists but cannot be
    /// parsed.
    fn extract(&self, contents: &str, path: &Path) -> Result<Option<PageConfig>, ExtractError>;
}

static BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<i18n-routes(?:\s[^>]*)?>(.*?)</i18n-routes>")
        .expect("i18n-routes block pattern is valid")
});

/// Reads locale routes from YAML front matter or an `<i18n-routes>` block.
///
/// Front matter wins when both are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedConfigExtractor;

impl EmbeddedConfigExtractor {
    /// Create the extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PageConfigExtractor for EmbeddedConfigExtractor {
    fn extract(&self, contents: &str, path: &Path) -> Result<Option<PageConfig>, ExtractError> {
        let body = match front_matter(contents, path)? {
            Some(body) => body,
            None => match BLOCK_REGEX.captures(contents) {
                Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
                None => return Ok(None),
            },
        };

        let config = parse_page_config(body, path)?;
        tracing::debug!(
            path = %path.display(),
            locales = config.locale_routes.as_ref().map_or(0, BTreeMap::len),
            "Extracted embedded page config"
        );
        Ok(Some(config))
    }
}

/// Return the body between a leading `---` line and the next `---` line.
fn front_matter<'a>(contents: &'a str, path: &Path) -> Result<Option<&'a str>, ExtractError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let Some(rest) = contents
        .strip_prefix("---\n")
        .or_else(|| contents.strip_prefix("---\r\n"))
    else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Ok(Some(&rest[..offset]));
        }
        offset += line.len();
    }
    Err(ExtractError::Unterminated(path.to_path_buf()))
}

/// Parse YAML into a [`PageConfig`]. Blank input yields the default config.
fn parse_page_config(body: &str, path: &Path) -> Result<PageConfig, ExtractError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(PageConfig::default());
    }
    serde_yaml::from_str(trimmed).map_err(|e| ExtractError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn routes(pairs: &[(&str, &str)]) -> Option<LocaleRoutes> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    fn extract(contents: &str) -> Result<Option<PageConfig>, ExtractError> {
        EmbeddedConfigExtractor::new().extract(contents, Path::new("pages/about.vue"))
    }

    #[test]
    fn test_no_embedded_config() {
        assert_eq!(extract("<template><h1>About</h1></template>").unwrap(), None);
    }

    #[test]
    fn test_front_matter() {
        let src = "---\nlocaleRoutes:\n  fr: /a-propos\n  de: /ueber-uns\n---\n# About\n";
        let config = extract(src).unwrap().unwrap();
        assert_eq!(
            config.locale_routes,
            routes(&[("de", "/ueber-uns"), ("fr", "/a-propos")])
        );
    }

    #[test]
    fn test_front_matter_crlf_and_bom() {
        let src = "\u{feff}---\r\nlocaleRoutes:\r\n  fr: /a-propos\r\n---\r\nbody";
        let config = extract(src).unwrap().unwrap();
        assert_eq!(config.locale_routes, routes(&[("fr", "/a-propos")]));
    }

    #[test]
    fn test_front_matter_without_locale_routes() {
        let config = extract("---\ntitle: About\n---\n").unwrap().unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn test_snake_case_alias() {
        let config = extract("---\nlocale_routes:\n  fr: /a-propos\n---\n")
            .unwrap()
            .unwrap();
        assert_eq!(config.locale_routes, routes(&[("fr", "/a-propos")]));
    }

    #[test]
    fn test_custom_block() {
        let src = r#"<template><div/></template>
<i18n-routes lang="yaml">
localeRoutes:
  fr: /a-propos
</i18n-routes>
<script setup></script>"#;
        let config = extract(src).unwrap().unwrap();
        assert_eq!(config.locale_routes, routes(&[("fr", "/a-propos")]));
    }

    #[test]
    fn test_custom_block_json_body() {
        let src = r#"<i18n-routes>{"localeRoutes": {"de": "/ueber-uns"}}</i18n-routes>"#;
        let config = extract(src).unwrap().unwrap();
        assert_eq!(config.locale_routes, routes(&[("de", "/ueber-uns")]));
    }

    #[test]
    fn test_front_matter_wins_over_block() {
        let src = "---\nlocaleRoutes:\n  fr: /front\n---\n<i18n-routes>localeRoutes:\n  fr: /block\n</i18n-routes>";
        let config = extract(src).unwrap().unwrap();
        assert_eq!(config.locale_routes, routes(&[("fr", "/front")]));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = extract("---\nlocaleRoutes: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
        assert!(err.to_string().contains("pages/about.vue"));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let err = extract("---\nlocaleRoutes: /not-a-map\n---\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = extract("---\nlocaleRoutes:\n  fr: /x\n").unwrap_err();
        assert!(matches!(err, ExtractError::Unterminated(_)));
    }
}
