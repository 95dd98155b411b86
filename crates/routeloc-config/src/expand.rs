//! `${VAR}` expansion for path-like configuration values.
//!
//! Only the braced form is recognised. `${VAR}` fails when `VAR` is unset,
//! `${VAR:-fallback}` substitutes the fallback instead. A bare `$VAR` is
//! passed through untouched so route-ish strings survive.

use crate::ConfigError;

/// Name of the variable that could not be resolved.
struct UnsetVar(String);

/// Expand environment references in `value`.
///
/// `field` is the dotted config key, used in the error message.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }
    let value = escape_bare_dollars(value);

    let lookup = |name: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    };

    match shellexpand::env_with_context(&value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}

/// Double every `$` outside a `${...}` reference; shellexpand reads `$$` as `$`.
///
/// Text inside the braces is copied as-is because fallback values are
/// substituted without unescaping.
fn escape_bare_dollars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 4);
    let mut rest = value;
    while let Some(idx) = rest.find('$') {
        escaped.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if rest.starts_with("${")
            && let Some(close) = rest.find('}')
        {
            escaped.push_str(&rest[..=close]);
            rest = &rest[close + 1..];
            continue;
        }
        escaped.push_str("$$");
        rest = &rest[1..];
    }
    escaped.push_str(rest);
    escaped
}
