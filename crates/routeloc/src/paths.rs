//! Path and route-name builders.
//!
//! Pure functions shared by the indexer and the localizer. All functions
//! return normalized paths: a single leading `/`, no empty segments, no
//! trailing `/` except for the root itself.

/// Name of the route parameter carrying the locale in grouped routes.
const LOCALE_PARAM: &str = "locale";

/// Prefix of every generated route name.
const NAME_PREFIX: &str = "localized";

/// Normalize a route path.
///
/// `normalize(normalize(p)) == normalize(p)` for every input.
///
/// # Examples
///
/// - `""` -> `"/"`
/// - `"about/"` -> `"/about"`
/// - `"//a///b"` -> `"/a/b"`
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Join a child path onto its parent's full path.
#[must_use]
pub fn join(parent: &str, child: &str) -> String {
    normalize(&format!("{parent}/{child}"))
}

/// Normalized path without its leading `/`, as nested routes expect.
#[must_use]
pub fn relative(path: &str) -> String {
    let normalized = normalize(path);
    normalized[1..].to_owned()
}

/// Prefix `path` with a literal locale segment: `("fr", "/about")` -> `/fr/about`.
#[must_use]
pub fn prefixed(locale: &str, path: &str) -> String {
    join(&format!("/{locale}"), path)
}

/// Build one path matching several locales at the locale position.
///
/// A single code without a matcher yields a literal prefix. Otherwise the
/// locale segment becomes a `:locale(...)` parameter whose pattern is either
/// `matcher` or the alternation of `locales`.
///
/// # Examples
///
/// - `(["fr"], "/about", None)` -> `/fr/about`
/// - `(["fr", "de"], "/about", None)` -> `/:locale(fr|de)/about`
/// - `(["fr", "de"], "/about", Some("[a-z]{2}"))` -> `/:locale([a-z]{2})/about`
#[must_use]
pub fn grouped(locales: &[&str], path: &str, matcher: Option<&str>) -> String {
    match (locales, matcher) {
        ([single], None) => prefixed(single, path),
        (_, Some(pattern)) => join(&format!("/:{LOCALE_PARAM}({pattern})"), path),
        (_, None) => join(&format!("/:{LOCALE_PARAM}({})", locales.join("|")), path),
    }
}

/// Whether a route for `locale` carries a locale prefix.
///
/// Non-default locales are always prefixed. The default locale is prefixed
/// only when default-locale routes are included or the caller forces it.
#[must_use]
pub fn should_add_locale_prefix(
    locale: &str,
    default_locale: &str,
    force_prefix: bool,
    include_default_locale_route: bool,
) -> bool {
    locale != default_locale || include_default_locale_route || force_prefix
}

/// Derive the name of a generated route.
///
/// Returns `localized-{base}-{locale}`, or `base` unchanged when `locale` is
/// the default locale and no suffix was requested. Unnamed routes stay
/// unnamed.
#[must_use]
pub fn route_name(base: Option<&str>, locale: &str, is_default: bool, suffix: bool) -> Option<String> {
    let base = base?;
    if is_default && !suffix {
        return Some(base.to_owned());
    }
    Some(format!("{NAME_PREFIX}-{base}-{locale}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("about"), "/about");
        assert_eq!(normalize("/about/"), "/about");
        assert_eq!(normalize("//a///b//"), "/a/b");
        assert_eq!(normalize("/user/:id()"), "/user/:id()");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for p in ["", "/", "a", "/a/", "//x//y/", "/:locale(en|fr)/about", "a/b/c/"] {
            let once = normalize(p);
            assert_eq!(normalize(&once), once, "input {p:?}");
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "/about"), "/about");
        assert_eq!(join("/about", "team"), "/about/team");
        assert_eq!(join("/about/", "/team/"), "/about/team");
        assert_eq!(join("/about", ""), "/about");
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative("/team"), "team");
        assert_eq!(relative("team/"), "team");
        assert_eq!(relative(""), "");
    }

    #[test]
    fn test_prefixed() {
        assert_eq!(prefixed("fr", "/about"), "/fr/about");
        assert_eq!(prefixed("fr", "/"), "/fr");
        assert_eq!(prefixed("fr", "a-propos"), "/fr/a-propos");
    }

    #[test]
    fn test_grouped_single_locale_is_literal() {
        assert_eq!(grouped(&["fr"], "/about", None), "/fr/about");
    }

    #[test]
    fn test_grouped_many_locales() {
        assert_eq!(grouped(&["fr", "de"], "/about", None), "/:locale(fr|de)/about");
        assert_eq!(grouped(&["fr", "de"], "/", None), "/:locale(fr|de)");
    }

    #[test]
    fn test_grouped_with_matcher() {
        assert_eq!(
            grouped(&["fr", "de"], "/about", Some("[a-z]{2}")),
            "/:locale([a-z]{2})/about"
        );
        assert_eq!(
            grouped(&["fr"], "/about", Some("[a-z]{2}")),
            "/:locale([a-z]{2})/about"
        );
    }

    #[test]
    fn test_should_add_locale_prefix() {
        assert!(should_add_locale_prefix("fr", "en", false, false));
        assert!(!should_add_locale_prefix("en", "en", false, false));
        assert!(should_add_locale_prefix("en", "en", true, false));
        assert!(should_add_locale_prefix("en", "en", false, true));
    }

    #[test]
    fn test_route_name() {
        assert_eq!(
            route_name(Some("about"), "fr", false, false),
            Some("localized-about-fr".to_owned())
        );
        assert_eq!(
            route_name(Some("about"), "en", true, true),
            Some("localized-about-en".to_owned())
        );
        assert_eq!(route_name(Some("about"), "en", true, false), Some("about".to_owned()));
        assert_eq!(route_name(None, "fr", false, true), None);
    }
}
