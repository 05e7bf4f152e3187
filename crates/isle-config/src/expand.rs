//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::convert::Infallible;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // Unset variables without a default are left in place by shellexpand.
    let expanded = shellexpand::env_with_context(value, lookup_env)
        .map_or_else(|e| match e.cause {}, std::borrow::Cow::into_owned);

    if let Some(var_name) = unresolved_var(&expanded) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        });
    }

    Ok(expanded)
}

/// Look up a variable; unset variables are left for `unresolved_var`.
fn lookup_env(var: &str) -> Result<Option<String>, Infallible> {
    Ok(std::env::var(var).ok())
}

/// Find the first `${NAME}` reference left after expansion.
fn unresolved_var(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let len = value[start..].find('}')?;
    let name = &value[start..start + len];
    let is_var_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_var_name.then_some(name)
}
