#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for the Eventide services.
//!
//! # Usage
//!
//! ```rust,no_run
//! use eventide_config::Config;
//!
//! // defaults → optional file (explicit or EVENTIDE_CONFIG) → env fallbacks
//! let resolved = Config::load(None).unwrap();
//! println!("issuer: {}", resolved.config.jwt.issuer);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Config file** (`--config PATH` or `EVENTIDE_CONFIG`)
//! 2. **Environment variables** (`EVENTIDE_*`) - fallback only, never
//!    override a value the file sets
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Deep merging of TOML trees.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration from defaults, an optional file, and the process
    /// environment.
    ///
    /// With `path` unset, `EVENTIDE_CONFIG` names the file, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable or malformed, or
    /// the merged configuration fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(path, &env::collect_env_vars())
    }
}
