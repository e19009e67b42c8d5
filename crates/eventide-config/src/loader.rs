//! Config file discovery and layered loading.
//!
//! 1. Parse `defaults.toml` → base
//! 2. Merge the config file (explicit path or `EVENTIDE_CONFIG`)
//! 3. Apply env var fallbacks for fields the file left unset
//! 4. Deserialize merged tree → `Config`
//! 5. Validate

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{CONFIG_PATH_VAR, apply_env_fallbacks};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// A loaded configuration and where its values came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The validated configuration.
    pub config: Config,
    /// The file merged over the defaults, if any.
    pub loaded_file: Option<PathBuf>,
    /// Number of fields filled from environment variables.
    pub env_overrides: usize,
}

/// Load configuration using `env_vars` in place of the process environment.
///
/// With `path` unset, the file named by `EVENTIDE_CONFIG` is used if the
/// variable is present. A named file that does not exist is an error.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, oversized, or
/// malformed, or if the merged configuration fails validation.
pub fn load(path: Option<&Path>, env_vars: &HashMap<String, String>) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let file = path.map(Path::to_path_buf).or_else(|| {
        env_vars
            .get(CONFIG_PATH_VAR)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    });

    let mut file_set_paths = BTreeSet::new();
    if let Some(file) = &file {
        let overlay = load_file_value(file)?;
        deep_merge(&mut merged, &overlay, "", &mut file_set_paths);
        info!(path = %file.display(), "loaded config file");
    }

    let env_overrides = apply_env_fallbacks(&mut merged, &file_set_paths, env_vars);
    if env_overrides > 0 {
        debug!(count = env_overrides, "applied environment variable fallbacks");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        loaded_file: file,
        env_overrides,
    })
}

/// Parse only the embedded defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the embedded defaults fail to parse.
pub fn defaults() -> ConfigResult<Config> {
    toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
        path: "<embedded defaults>".to_owned(),
        source: e,
    })
}

fn load_file_value(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // Checked after reading to avoid a stat/read race.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_defaults_only() {
        let resolved = load(None, &HashMap::new()).unwrap();
        let config = resolved.config;

        assert!(resolved.loaded_file.is_none());
        assert_eq!(resolved.env_overrides, 0);
        assert_eq!(config.jwt.issuer, "AccountService");
        assert_eq!(config.jwt.ttl_minutes, 120);
        assert_eq!(config.events.page_size, 10);
        assert_eq!(config.events.max_page_size, 100);
        assert_eq!(config.accounts.seed.len(), 2);
        assert_eq!(config.seed_accounts().unwrap().len(), 2);
    }

    #[test]
    fn test_defaults_match_struct_defaults() {
        let parsed = defaults().unwrap();
        let built = Config::default();
        assert_eq!(parsed.jwt.key, built.jwt.key);
        assert_eq!(parsed.jwt.issuer, built.jwt.issuer);
        assert_eq!(parsed.events.account_api_url, built.events.account_api_url);
        assert_eq!(parsed.logging.format, built.logging.format);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config("[jwt]\nissuer = \"Staging\"\nttl_minutes = 30\n");

        let resolved = load(Some(file.path()), &HashMap::new()).unwrap();
        assert_eq!(resolved.config.jwt.issuer, "Staging");
        assert_eq!(resolved.config.jwt.ttl_minutes, 30);
        assert_eq!(
            resolved.config.jwt.key,
            "super-secret-key-for-event-scheduling-platform-enhanced"
        );
        assert_eq!(resolved.loaded_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_config_path_from_env() {
        let file = write_config("[logging]\nformat = \"json\"\n");
        let vars = env(&[(CONFIG_PATH_VAR, file.path().to_str().unwrap())]);

        let resolved = load(None, &vars).unwrap();
        assert_eq!(resolved.config.logging.format, "json");
    }

    #[test]
    fn test_env_only_fills_unset_fields() {
        let file = write_config("[jwt]\nissuer = \"FromFile\"\n");
        let vars = env(&[
            ("EVENTIDE_JWT_ISSUER", "FromEnv"),
            ("EVENTIDE_ACCOUNT_API_URL", "http://accounts.internal:8080"),
        ]);

        let resolved = load(Some(file.path()), &vars).unwrap();
        assert_eq!(resolved.config.jwt.issuer, "FromFile");
        assert_eq!(
            resolved.config.events.account_api_url,
            "http://accounts.internal:8080"
        );
        assert_eq!(resolved.env_overrides, 1);
    }

    #[test]
    fn test_seed_array_replaced_by_file() {
        let file = write_config(
            r#"
[[accounts.seed]]
name = "ops"
role = "Admin"
email = "ops@x.com"
password_hash = "UtRa5nECyqzKQt94ssKiAg==.GiUL5v6TjEcWXvFDRla2LaPLdgjnskef6jW4RpMikW8=.100000"
"#,
        );

        let resolved = load(Some(file.path()), &HashMap::new()).unwrap();
        let seeds = resolved.config.seed_accounts().unwrap();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].name, "ops");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("absent.toml")), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = write_config("[jwt\nissuer = ");
        let err = load(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_oversized_file_is_error() {
        let padding = "#".repeat(1_100_000);
        let file = write_config(&padding);
        let err = load(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config("[events]\npage_size = 500\n");
        let err = load(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("events.page_size"));
    }

    #[test]
    fn test_unbounded_ttl_rejected() {
        let file = write_config("[jwt]\nttl_minutes = 9223372036854775807\n");
        let err = load(Some(file.path()), &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("jwt.ttl_minutes"));
    }
}
