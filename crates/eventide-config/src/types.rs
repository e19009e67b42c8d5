//! Configuration struct definitions.
//!
//! Every section implements `Default` with the same values as the embedded
//! `defaults.toml`, so a partially-written file still deserializes.

use std::collections::HashSet;

use eventide_core::{Account, Role};
use eventide_crypto::{EncodedCredential, SigningSecret};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bearer token signing.
    pub jwt: JwtSection,
    /// Accounts written into an empty directory at startup.
    pub accounts: AccountsSection,
    /// Event search and owner lookup.
    pub events: EventsSection,
    /// Log output.
    pub logging: LoggingSection,
}

impl Config {
    /// Copy with the signing key and seed credentials masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.jwt.key = REDACTED.to_owned();
        for seed in &mut copy.accounts.seed {
            seed.password_hash = REDACTED.to_owned();
        }
        copy
    }

    /// The configured signing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the key is too short.
    pub fn signing_secret(&self) -> ConfigResult<SigningSecret> {
        SigningSecret::from_text(&self.jwt.key).map_err(|e| ConfigError::ValidationError {
            field: "jwt.key".to_owned(),
            message: e.to_string(),
        })
    }

    /// Seed entries converted to accounts with fresh ids.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an unknown role, an
    /// unparseable credential, or a repeated name.
    pub fn seed_accounts(&self) -> ConfigResult<Vec<Account>> {
        let mut seen = HashSet::new();
        self.accounts
            .seed
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                if !seen.insert(seed.name.as_str()) {
                    return Err(seed_error(i, "name", format!("duplicate account name '{}'", seed.name)));
                }
                seed.to_account()
                    .map_err(|(field, message)| seed_error(i, field, message))
            })
            .collect()
    }
}

const REDACTED: &str = "[REDACTED]";

fn seed_error(index: usize, field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: format!("accounts.seed[{index}].{field}"),
        message,
    }
}

/// `[jwt]` section.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSection {
    /// Shared HMAC-SHA256 key text.
    pub key: String,
    /// Value written to and required in the `iss` claim.
    pub issuer: String,
    /// Token lifetime in minutes.
    pub ttl_minutes: i64,
}

impl Default for JwtSection {
    fn default() -> Self {
        Self {
            key: "super-secret-key-for-event-scheduling-platform-enhanced".to_owned(),
            issuer: "AccountService".to_owned(),
            ttl_minutes: 120,
        }
    }
}

impl std::fmt::Debug for JwtSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSection")
            .field("key", &REDACTED)
            .field("issuer", &self.issuer)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

/// `[accounts]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsSection {
    /// `[[accounts.seed]]` entries.
    pub seed: Vec<SeedAccount>,
}

/// One seeded account with a pre-encoded credential.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedAccount {
    /// Unique account name.
    pub name: String,
    /// `Admin` or `User`.
    pub role: String,
    /// Contact address.
    pub email: String,
    /// Credential in `salt.key.iterations` form.
    pub password_hash: String,
}

impl SeedAccount {
    fn to_account(&self) -> Result<Account, (&'static str, String)> {
        if self.name.trim().is_empty() {
            return Err(("name", "must not be empty".to_owned()));
        }
        let role: Role = self
            .role
            .parse()
            .map_err(|_| ("role", format!("'{}' is not Admin or User", self.role)))?;
        self.password_hash
            .parse::<EncodedCredential>()
            .map_err(|e| ("password_hash", e.to_string()))?;

        Ok(Account::register(&self.name, &self.password_hash, &self.email).with_role(role))
    }
}

impl std::fmt::Debug for SeedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccount")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// `[events]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsSection {
    /// Page size when a search omits one.
    pub page_size: u32,
    /// Largest page size a search may request.
    pub max_page_size: u32,
    /// Base URL of the account service used to confirm event owners.
    pub account_api_url: String,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_page_size: 100,
            account_api_url: "https://localhost:7174".to_owned(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default level: trace, debug, info, warn, or error.
    pub level: String,
    /// Output format: pretty, compact, or json.
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
        }
    }
}
