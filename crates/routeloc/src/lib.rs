//! Locale-aware route tree expansion.
//!
//! Takes the locale-agnostic route tree discovered by a host framework and
//! expands it so every page is reachable under each configured locale, e.g.
//! `/about` also becomes `/fr/about` or `/fr/a-propos`.
//!
//! The work happens in two passes:
//! - [`OverrideIndexer`] collects per-locale custom paths from the global
//!   override table and from each page's embedded configuration
//! - [`RouteLocalizer`] rewrites the tree and appends generated routes
//!
//! [`LocalizationEngine`] runs both passes from a loaded configuration.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use routeloc::{LocalizationEngine, PageNode};
//!
//! let engine = LocalizationEngine::from_config_file(None, None)?;
//! let mut tree = vec![PageNode::new("about", "/about").with_file("pages/about.vue")];
//! let stats = engine.run(&mut tree)?;
//! assert!(tree.len() >= stats.pages);
//! # Ok(())
//! # }
//! ```

mod engine;
mod index;
mod locale;
mod localizer;
mod overrides;
mod page;
pub mod paths;

pub use engine::{EngineError, LocalizationEngine};
pub use index::{IndexError, LocalizedPathIndex, OverrideIndexer};
pub use locale::{Locale, LocaleRegistry};
pub use localizer::{LocalizeStats, RouteLocalizer};
pub use overrides::{OverrideTable, RouteOverride};
pub use page::{PageNode, from_json, to_json};

// Re-export collaborator types used in public signatures
pub use routeloc_config::{Config, ConfigError, Settings, TextDirection};
pub use routeloc_source::{
    EmbeddedConfigExtractor, FsPageSource, LocaleRoutes, PageConfig, PageConfigExtractor, PageSource,
};
