//! Configuration management for routeloc.
//!
//! Parses `routeloc.toml` with serde and provides auto-discovery of the
//! config file in parent directories.
//!
//! Build-tool settings can be applied during load via [`Settings`].
//!
//! ## Environment Variable Expansion
//!
//! `routes.root_dir` supports `${VAR}` and `${VAR:-default}`.

mod expand;
mod pages;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

pub use pages::{PageOverride, PagesConfig};

/// Settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Settings {
    /// Override the root directory used to resolve page files.
    pub root_dir: Option<PathBuf>,
    /// Override the default locale code.
    pub default_locale: Option<String>,
    /// Override the include-default-locale-route policy.
    pub include_default_locale_route: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "routeloc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale configuration.
    pub i18n: I18nConfig,
    /// Route discovery configuration (paths are relative strings from TOML).
    routes: RoutesConfigRaw,
    /// Per-page overrides.
    pub pages: PagesConfig,

    /// Resolved routes configuration (set after loading).
    #[serde(skip)]
    pub routes_resolved: RoutesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Ordered list of locales.
    pub locales: Vec<LocaleConfig>,
    /// Code of the default locale. Need not be one of `locales`.
    pub default_locale: String,
    /// Also generate a locale-prefixed route for the default locale.
    pub include_default_locale_route: bool,
    /// Pattern used for the `:locale` parameter of grouped routes instead of
    /// the literal code alternation.
    pub locale_matcher: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: vec![LocaleConfig::new("en")],
            default_locale: "en".to_owned(),
            include_default_locale_route: false,
            locale_matcher: None,
        }
    }
}

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left to right.
    Ltr,
    /// Right to left.
    Rtl,
    /// Decided by the content.
    Auto,
}

/// A configured locale.
///
/// Accepts either a bare code (`"fr"`) or a table with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "LocaleConfigRaw")]
pub struct LocaleConfig {
    /// Locale code used in URLs and route names.
    pub code: String,
    /// Language/region tag (e.g. `fr-FR`).
    pub iso: Option<String>,
    /// Text direction.
    pub dir: Option<TextDirection>,
    /// Human readable name.
    pub display_name: Option<String>,
}

impl LocaleConfig {
    /// Locale with only a code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            iso: None,
            dir: None,
            display_name: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocaleConfigRaw {
    Code(String),
    Table {
        code: String,
        iso: Option<String>,
        dir: Option<TextDirection>,
        display_name: Option<String>,
    },
}

impl From<LocaleConfigRaw> for LocaleConfig {
    fn from(raw: LocaleConfigRaw) -> Self {
        match raw {
            LocaleConfigRaw::Code(code) => Self::new(code),
            LocaleConfigRaw::Table {
                code,
                iso,
                dir,
                display_name,
            } => Self {
                code,
                iso,
                dir,
                display_name,
            },
        }
    }
}

/// Raw routes configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RoutesConfigRaw {
    root_dir: Option<String>,
}

/// Resolved routes configuration with absolute paths.
#[derive(Debug, Default)]
pub struct RoutesConfig {
    /// Directory page `file` references are resolved against.
    pub root_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g. "`routes.root_dir`").
        field: String,
        /// Error message (e.g. "${`APP_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `routeloc.toml` in the current directory and
    /// its parents, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(config_path: Option<&Path>, settings: Option<&Settings>) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = settings {
            config.apply_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error on malformed TOML, unset environment variables or
    /// validation failure.
    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        if let Some(root_dir) = &settings.root_dir {
            self.routes_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(default_locale) = &settings.default_locale {
            self.i18n.default_locale.clone_from(default_locale);
        }
        if let Some(include) = settings.include_default_locale_route {
            self.i18n.include_default_locale_route = include;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            i18n: I18nConfig::default(),
            routes: RoutesConfigRaw::default(),
            pages: PagesConfig::default(),
            routes_resolved: RoutesConfig {
                root_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. An unknown
    /// `default_locale` is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_i18n()?;
        self.validate_pages()?;
        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        if self.i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must not be empty".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for locale in &self.i18n.locales {
            require_non_empty(&locale.code, "i18n.locales[].code")?;
            if !seen.insert(locale.code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales contains duplicate code \"{}\"",
                    locale.code
                )));
            }
        }

        require_non_empty(&self.i18n.default_locale, "i18n.default_locale")?;

        if let Some(matcher) = &self.i18n.locale_matcher {
            require_non_empty(matcher, "i18n.locale_matcher")?;
            Regex::new(&format!("^(?:{matcher})$")).map_err(|e| {
                ConfigError::Validation(format!("i18n.locale_matcher is not a valid pattern: {e}"))
            })?;
        }

        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        for (name, entry) in self.pages.iter() {
            if let PageOverride::Paths(paths) = entry {
                for (locale, path) in paths {
                    require_non_empty(path, &format!("pages.{name}.{locale}"))?;
                }
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root_dir) = self.routes.root_dir {
            self.routes.root_dir = Some(expand::expand_env(root_dir, "routes.root_dir")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.routes_resolved = RoutesConfig {
            root_dir: config_dir.join(self.routes.root_dir.as_deref().unwrap_or(".")),
        };
    }
}
