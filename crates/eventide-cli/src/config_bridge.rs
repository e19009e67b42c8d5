//! Bridge from `eventide_config::Config` to runtime types.

use chrono::Duration;
use eventide_auth::TokenIssuer;
use eventide_config::Config;
use eventide_telemetry::{LogConfig, LogFormat};

/// Logging settings from the `[logging]` section.
pub(crate) fn to_log_config(config: &Config) -> LogConfig {
    let format = config.logging.format.parse().unwrap_or(LogFormat::Compact);
    LogConfig::new(config.logging.level.to_ascii_lowercase()).with_format(format)
}

/// Token issuer from the `[jwt]` section.
pub(crate) fn to_token_issuer(config: &Config) -> anyhow::Result<TokenIssuer> {
    let secret = config.signing_secret()?;
    let Some(ttl) = Duration::try_minutes(config.jwt.ttl_minutes) else {
        anyhow::bail!(
            "jwt.ttl_minutes {} is out of range for a token lifetime",
            config.jwt.ttl_minutes
        );
    };
    Ok(TokenIssuer::new(secret, config.jwt.issuer.clone()).with_ttl(ttl))
}
