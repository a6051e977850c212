//! Environment variable expansion for configuration strings.
//!
//! Only braced references are expanded: `${VAR}` and `${VAR:-default}`.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a literal such as
/// `$admin` survives.
///
/// # Errors
///
/// Returns `ConfigError::EnvVar` naming `field` if a referenced variable
/// without a default is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a referenced variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("guest", "f").unwrap(), "guest");
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        assert_eq!(expand_env("$admin", "f").unwrap(), "$admin");
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env("${BSNAV_TEST_SURELY_UNSET_VAR:-guest}", "f").unwrap();

        assert_eq!(value, "guest");
    }

    #[test]
    fn test_missing_variable_is_error() {
        let err = expand_env("${BSNAV_UNSET_TEST_VAR}", "menu.partial").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in menu.partial: ${BSNAV_UNSET_TEST_VAR} not set"
        );
    }
}
