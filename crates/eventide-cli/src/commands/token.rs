//! Token commands - sign and inspect bearer tokens.

use anyhow::Context;
use eventide_config::Config;
use eventide_core::{Role, UserId};

use crate::config_bridge::to_token_issuer;

/// Sign a token for the given subject and print it.
pub(crate) fn issue_token(config: &Config, user_id: &str, name: &str, role: &str) -> anyhow::Result<()> {
    let user_id: UserId = user_id
        .parse()
        .with_context(|| format!("'{user_id}' is not a valid account id"))?;
    let role: Role = role.parse()?;

    let issued = to_token_issuer(config)?.issue(user_id, name, role)?;
    tracing::debug!(user_id = %user_id, expires_at = %issued.expires_at, "issued token");

    println!("{}", issued.token);
    eprintln!("expires {}", issued.expires_at.to_rfc3339());
    Ok(())
}

/// Verify a token and print its claims as JSON.
pub(crate) fn verify_token(config: &Config, token: &str) -> anyhow::Result<()> {
    let claims = to_token_issuer(config)?.verifier().claims(token.trim())?;
    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}
