//! Localization engine facade.
//!
//! Wires the locale registry, the override table and the page collaborators
//! together and runs the two passes in order: indexing, then localization.

use std::path::Path;
use std::sync::Arc;

use routeloc_config::{Config, ConfigError, Settings};
use routeloc_source::{EmbeddedConfigExtractor, FsPageSource, PageConfigExtractor, PageSource};

use crate::index::{IndexError, LocalizedPathIndex, OverrideIndexer};
use crate::locale::LocaleRegistry;
use crate::localizer::{LocalizeStats, RouteLocalizer};
use crate::overrides::OverrideTable;
use crate::page::{self, PageNode};

/// Error running the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Override indexing failed; the tree was not modified.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// Route tree JSON could not be parsed or written.
    #[error("Invalid route tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Expands route trees for every configured locale.
///
/// The engine holds no per-run state; one instance may process any number
/// of trees.
pub struct LocalizationEngine {
    registry: LocaleRegistry,
    overrides: OverrideTable,
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn PageConfigExtractor>,
}

impl LocalizationEngine {
    /// Create an engine reading page sources from `source`.
    ///
    /// Embedded locale routes are extracted with [`EmbeddedConfigExtractor`]
    /// unless replaced with [`with_extractor`](Self::with_extractor).
    #[must_use]
    pub fn new(registry: LocaleRegistry, overrides: OverrideTable, source: Arc<dyn PageSource>) -> Self {
        Self {
            registry,
            overrides,
            source,
            extractor: Arc::new(EmbeddedConfigExtractor::new()),
        }
    }

    /// Use a different page-config extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn PageConfigExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Build an engine from loaded configuration.
    ///
    /// Page files are resolved against `routes.root_dir`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let source = Arc::new(FsPageSource::new(config.routes_resolved.root_dir.clone()));
        Self::new(
            LocaleRegistry::from_config(&config.i18n),
            OverrideTable::from_config(&config.pages),
            source,
        )
    }

    /// Load configuration (explicit path or discovered `routeloc.toml`) and
    /// build an engine from it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration cannot be loaded.
    pub fn from_config_file(
        config_path: Option<&Path>,
        settings: Option<&Settings>,
    ) -> Result<Self, EngineError> {
        let config = Config::load(config_path, settings)?;
        Ok(Self::from_config(&config))
    }

    /// Locale registry in use.
    #[must_use]
    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Global override table in use.
    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Build the override index for `tree` without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if a page source cannot be read or its
    /// embedded configuration is malformed.
    pub fn index(&self, tree: &[PageNode]) -> Result<LocalizedPathIndex, IndexError> {
        OverrideIndexer::new(&self.overrides, self.source.as_ref(), self.extractor.as_ref()).index(tree)
    }

    /// Index and localize `tree` in place.
    ///
    /// The tree is only modified once indexing has fully succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Index`] if indexing fails.
    pub fn run(&self, tree: &mut Vec<PageNode>) -> Result<LocalizeStats, EngineError> {
        let index = self.index(tree)?;
        let stats = RouteLocalizer::new(&self.registry, &self.overrides, &index).localize(tree);

        tracing::info!(
            pages = stats.pages,
            excluded = stats.excluded,
            siblings = stats.siblings,
            generated = stats.generated_routes,
            "Route tree localized"
        );
        Ok(stats)
    }

    /// Localize a route tree given as JSON and return the result as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Json`] for malformed input and
    /// [`EngineError::Index`] if indexing fails.
    pub fn run_json(&self, json: &str) -> Result<String, EngineError> {
        let mut tree = page::from_json(json)?;
        self.run(&mut tree)?;
        Ok(page::to_json(&tree)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use routeloc_source::MockPageSource;

    use super::*;
    use crate::locale::Locale;
    use crate::overrides::RouteOverride;

    fn registry(codes: &[&str], default: &str, include: bool) -> LocaleRegistry {
        LocaleRegistry::new(codes.iter().map(|c| Locale::new(*c)).collect(), default, include)
    }

    fn names(tree: &[PageNode]) -> Vec<(Option<&str>, &str)> {
        tree.iter()
            .map(|p| (p.name.as_deref(), p.path.as_str()))
            .collect()
    }

    #[test]
    fn test_run_uses_embedded_routes() {
        let source = MockPageSource::new().with_file(
            "pages/about.vue",
            "---\nlocaleRoutes:\n  fr: /a-propos\n---\n<template/>",
        );
        let engine = LocalizationEngine::new(
            registry(&["en", "fr", "de"], "en", false),
            OverrideTable::new(),
            Arc::new(source),
        );
        let mut tree = vec![PageNode::new("about", "/about").with_file("pages/about.vue")];

        let stats = engine.run(&mut tree).unwrap();

        assert_eq!(
            names(&tree),
            vec![
                (Some("about"), "/about"),
                (Some("localized-about-de"), "/de/about"),
                (Some("localized-about-fr"), "/fr/a-propos"),
            ]
        );
        assert_eq!(stats.siblings, 2);
    }

    #[test]
    fn test_global_override_beats_embedded_routes() {
        let source = MockPageSource::new().with_file(
            "pages/about.vue",
            "<i18n-routes>\nlocaleRoutes:\n  fr: /embedded\n</i18n-routes>",
        );
        let overrides = OverrideTable::new().with(
            "about",
            RouteOverride::CustomPaths([("fr".to_owned(), "/global".to_owned())].into()),
        );
        let engine = LocalizationEngine::new(
            registry(&["en", "fr"], "en", false),
            overrides,
            Arc::new(source),
        );
        let mut tree = vec![PageNode::new("about", "/about").with_file("pages/about.vue")];

        engine.run(&mut tree).unwrap();

        assert_eq!(tree[1].path, "/fr/global");
    }

    #[test]
    fn test_index_failure_leaves_tree_untouched() {
        let source = MockPageSource::new()
            .with_file("pages/a.vue", "")
            .with_unreadable("pages/b.vue");
        let engine = LocalizationEngine::new(
            registry(&["en", "fr"], "en", false),
            OverrideTable::new(),
            Arc::new(source),
        );
        let input = vec![
            PageNode::new("a", "/a").with_file("pages/a.vue"),
            PageNode::new("b", "/b").with_file("pages/b.vue"),
        ];
        let mut tree = input.clone();

        let err = engine.run(&mut tree).unwrap_err();

        assert!(matches!(err, EngineError::Index(IndexError::Read { .. })));
        assert_eq!(tree, input);
    }

    #[test]
    fn test_run_json() {
        let source = MockPageSource::new();
        let engine = LocalizationEngine::new(
            registry(&["en", "fr"], "en", false),
            OverrideTable::new(),
            Arc::new(source),
        );

        let output = engine
            .run_json(r#"[{"name": "about", "path": "/about", "meta": {"auth": true}}]"#)
            .unwrap();
        let tree = page::from_json(&output).unwrap();

        assert_eq!(
            names(&tree),
            vec![(Some("about"), "/about"), (Some("localized-about-fr"), "/fr/about")]
        );
        assert_eq!(tree[1].props["meta"]["auth"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_run_json_rejects_malformed_input() {
        let engine = LocalizationEngine::new(
            registry(&["en"], "en", false),
            OverrideTable::new(),
            Arc::new(MockPageSource::new()),
        );

        assert!(matches!(engine.run_json("{"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_from_config_file_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("app/pages")).unwrap();
        fs::write(
            root.join("app/pages/contact.vue"),
            "---\nlocaleRoutes:\n  de: /kontakt\n---\n<template/>",
        )
        .unwrap();
        fs::write(
            root.join("routeloc.toml"),
            r#"
[i18n]
default_locale = "en"
locales = ["en", "fr", "de"]

[routes]
root_dir = "app"

[pages]
admin = false

[pages.about]
fr = "/a-propos"
"#,
        )
        .unwrap();

        let engine =
            LocalizationEngine::from_config_file(Some(&root.join("routeloc.toml")), None).unwrap();
        assert_eq!(engine.registry().active_locale_codes(), ["fr", "de"]);
        assert!(engine.overrides().is_excluded(Some("admin")));
        assert_eq!(engine.overrides().len(), 2);
        let mut tree = vec![
            PageNode::new("admin", "/admin"),
            PageNode::new("about", "/about"),
            PageNode::new("contact", "/contact").with_file("pages/contact.vue"),
        ];

        engine.run(&mut tree).unwrap();

        assert_eq!(
            names(&tree),
            vec![
                (Some("admin"), "/admin"),
                (Some("about"), "/about"),
                (Some("contact"), "/contact"),
                (Some("localized-about-fr"), "/fr/a-propos"),
                (Some("localized-contact-fr"), "/fr/contact"),
                (Some("localized-contact-de"), "/de/kontakt"),
            ]
        );
    }

    #[test]
    fn test_from_config_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result =
            LocalizationEngine::from_config_file(Some(&temp_dir.path().join("missing.toml")), None);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::NotFound(_)))
        ));
    }
}
