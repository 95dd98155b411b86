//! Locale registry.
//!
//! Holds the ordered locales, the default locale and the policy deciding
//! whether the default locale gets its own prefixed routes.

use routeloc_config::{I18nConfig, LocaleConfig, TextDirection};

/// A routing locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    /// Locale code used in URLs and generated route names.
    pub code: String,
    /// Language/region tag.
    pub iso: Option<String>,
    /// Text direction.
    pub dir: Option<TextDirection>,
    /// Human readable name.
    pub display_name: Option<String>,
}

impl Locale {
    /// Locale carrying only a code.
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

impl From<&LocaleConfig> for Locale {
    fn from(config: &LocaleConfig) -> Self {
        Self {
            code: config.code.clone(),
            iso: config.iso.clone(),
            dir: config.dir,
            display_name: config.display_name.clone(),
        }
    }
}

/// Configured locales and the default-locale policy.
///
/// Everything is computed at construction; the registry is read-only after.
#[derive(Clone, Debug)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    default_locale: Locale,
    include_default_locale_route: bool,
    active_codes: Vec<String>,
    locale_matcher: Option<String>,
}

impl LocaleRegistry {
    /// Build a registry.
    ///
    /// Later duplicates of a code are dropped. A `default_code` that matches
    /// no locale resolves to a code-only [`Locale`].
    #[must_use]
    pub fn new(locales: Vec<Locale>, default_code: &str, include_default_locale_route: bool) -> Self {
        let mut unique: Vec<Locale> = Vec::with_capacity(locales.len());
        for locale in locales {
            if unique.iter().any(|l| l.code == locale.code) {
                tracing::warn!(code = %locale.code, "Duplicate locale ignored");
                continue;
            }
            unique.push(locale);
        }

        let default_locale = unique
            .iter()
            .find(|l| l.code == default_code)
            .cloned()
            .unwrap_or_else(|| {
                tracing::warn!(
                    code = %default_code,
                    "Default locale is not among configured locales, using code only"
                );
                Locale::new(default_code)
            });

        let active_codes = unique
            .iter()
            .filter(|l| include_default_locale_route || l.code != default_locale.code)
            .map(|l| l.code.clone())
            .collect();

        Self {
            locales: unique,
            default_locale,
            include_default_locale_route,
            active_codes,
            locale_matcher: None,
        }
    }

    /// Build a registry from the `[i18n]` configuration section.
    #[must_use]
    pub fn from_config(config: &I18nConfig) -> Self {
        let locales = config.locales.iter().map(Locale::from).collect();
        Self::new(
            locales,
            &config.default_locale,
            config.include_default_locale_route,
        )
        .with_locale_matcher(config.locale_matcher.clone())
    }

    /// Use `matcher` as the `:locale` pattern of grouped routes.
    #[must_use]
    pub fn with_locale_matcher(mut self, matcher: Option<String>) -> Self {
        self.locale_matcher = matcher;
        self
    }

    /// Configured locales in declaration order.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// The default locale (possibly synthetic).
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Whether `code` is the default locale's code.
    #[must_use]
    pub fn is_default(&self, code: &str) -> bool {
        self.default_locale.code == code
    }

    /// Whether the default locale also gets locale-prefixed routes.
    #[must_use]
    pub fn include_default_locale_route(&self) -> bool {
        self.include_default_locale_route
    }

    /// Codes that receive generated routes, in declaration order.
    #[must_use]
    pub fn active_locale_codes(&self) -> &[String] {
        &self.active_codes
    }

    /// Pattern for the `:locale` parameter of grouped routes.
    #[must_use]
    pub fn locale_matcher(&self) -> Option<&str> {
        self.locale_matcher.as_deref()
    }
}
