//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound for `events.max_page_size`.
const MAX_PAGE_SIZE_UPPER_BOUND: u32 = 1_000;

/// Upper bound for `jwt.ttl_minutes` (one week).
pub const MAX_TTL_MINUTES: i64 = 10_080;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_jwt(config)?;
    validate_events(config)?;
    validate_logging(config)?;
    config.seed_accounts()?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_jwt(config: &Config) -> ConfigResult<()> {
    config.signing_secret()?;

    if config.jwt.issuer.trim().is_empty() {
        return Err(invalid("jwt.issuer", "must not be empty"));
    }
    if !(1..=MAX_TTL_MINUTES).contains(&config.jwt.ttl_minutes) {
        return Err(invalid(
            "jwt.ttl_minutes",
            format!(
                "must be between 1 and {MAX_TTL_MINUTES}, got {}",
                config.jwt.ttl_minutes
            ),
        ));
    }
    Ok(())
}

fn validate_events(config: &Config) -> ConfigResult<()> {
    let e = &config.events;

    if e.max_page_size == 0 || e.max_page_size > MAX_PAGE_SIZE_UPPER_BOUND {
        return Err(invalid(
            "events.max_page_size",
            format!(
                "must be between 1 and {MAX_PAGE_SIZE_UPPER_BOUND}, got {}",
                e.max_page_size
            ),
        ));
    }
    if e.page_size == 0 || e.page_size > e.max_page_size {
        return Err(invalid(
            "events.page_size",
            format!(
                "must be between 1 and max_page_size ({}), got {}",
                e.max_page_size, e.page_size
            ),
        ));
    }
    if !(e.account_api_url.starts_with("http://") || e.account_api_url.starts_with("https://")) {
        return Err(invalid(
            "events.account_api_url",
            format!("must be an http(s) URL, got '{}'", e.account_api_url),
        ));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !matches!(
        l.level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        return Err(invalid(
            "logging.level",
            format!("unknown level '{}'", l.level),
        ));
    }
    if !matches!(l.format.as_str(), "pretty" | "compact" | "json") {
        return Err(invalid(
            "logging.format",
            format!("must be pretty, compact, or json, got '{}'", l.format),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_short_key() {
        let mut config = Config::default();
        config.jwt.key = "too-short".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "jwt.key");
    }

    #[test]
    fn test_ttl_bounds() {
        let mut config = Config::default();
        config.jwt.ttl_minutes = 0;
        assert_eq!(field_of(validate(&config).unwrap_err()), "jwt.ttl_minutes");

        config.jwt.ttl_minutes = MAX_TTL_MINUTES;
        assert!(validate(&config).is_ok());

        config.jwt.ttl_minutes = MAX_TTL_MINUTES + 1;
        assert_eq!(field_of(validate(&config).unwrap_err()), "jwt.ttl_minutes");

        config.jwt.ttl_minutes = i64::MAX;
        assert_eq!(field_of(validate(&config).unwrap_err()), "jwt.ttl_minutes");
    }

    #[test]
    fn test_page_sizes() {
        let mut config = Config::default();
        config.events.page_size = 0;
        assert_eq!(field_of(validate(&config).unwrap_err()), "events.page_size");

        config.events.page_size = 10;
        config.events.max_page_size = 5_000;
        assert_eq!(field_of(validate(&config).unwrap_err()), "events.max_page_size");
    }

    #[test]
    fn test_account_api_url_scheme() {
        let mut config = Config::default();
        config.events.account_api_url = "localhost:7174".to_owned();
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "events.account_api_url"
        );
    }

    #[test]
    fn test_logging_values() {
        let mut config = Config::default();
        config.logging.level = "WARN".to_owned();
        assert!(validate(&config).is_ok());

        config.logging.level = "loud".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.level");

        config.logging.level = "info".to_owned();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.format");
    }
}
