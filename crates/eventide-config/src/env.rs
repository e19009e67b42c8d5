//! Environment variable fallbacks.
//!
//! An environment variable only fills a field when no config file set it.

use std::collections::{BTreeSet, HashMap};

/// Environment variable name and the dotted config path it fills.
pub const ENV_FALLBACKS: &[(&str, &str)] = &[
    ("EVENTIDE_JWT_KEY", "jwt.key"),
    ("EVENTIDE_JWT_ISSUER", "jwt.issuer"),
    ("EVENTIDE_ACCOUNT_API_URL", "events.account_api_url"),
    ("EVENTIDE_LOG_LEVEL", "logging.level"),
];

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "EVENTIDE_CONFIG";

/// Snapshot the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Write env fallbacks into `merged` for every path not in `file_set_paths`.
///
/// Returns the number of fields filled from the environment.
pub fn apply_env_fallbacks(
    merged: &mut toml::Value,
    file_set_paths: &BTreeSet<String>,
    env_vars: &HashMap<String, String>,
) -> usize {
    let mut applied = 0usize;
    for (var, path) in ENV_FALLBACKS {
        if file_set_paths.contains(*path) {
            continue;
        }
        let Some(value) = env_vars.get(*var).filter(|v| !v.is_empty()) else {
            continue;
        };
        if set_path(merged, path, toml::Value::String(value.clone())) {
            tracing::debug!(var = %var, path = %path, "applied env fallback");
            applied = applied.saturating_add(1);
        }
    }
    applied
}

fn set_path(root: &mut toml::Value, path: &str, value: toml::Value) -> bool {
    let mut segments = path.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        let Some(table) = current.as_table_mut() else {
            return false;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return true;
        }
        current = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_fills_unset_fields() {
        let mut merged: toml::Value = toml::from_str("[jwt]\nissuer = \"a\"\n").unwrap();
        let applied = apply_env_fallbacks(
            &mut merged,
            &BTreeSet::new(),
            &env(&[("EVENTIDE_JWT_ISSUER", "b"), ("EVENTIDE_LOG_LEVEL", "debug")]),
        );

        assert_eq!(applied, 2);
        assert_eq!(merged["jwt"]["issuer"].as_str(), Some("b"));
        assert_eq!(merged["logging"]["level"].as_str(), Some("debug"));
    }

    #[test]
    fn test_file_values_win() {
        let mut merged: toml::Value = toml::from_str("[jwt]\nissuer = \"file\"\n").unwrap();
        let set: BTreeSet<String> = ["jwt.issuer".to_owned()].into();

        let applied = apply_env_fallbacks(&mut merged, &set, &env(&[("EVENTIDE_JWT_ISSUER", "env")]));

        assert_eq!(applied, 0);
        assert_eq!(merged["jwt"]["issuer"].as_str(), Some("file"));
    }

    #[test]
    fn test_empty_values_ignored() {
        let mut merged: toml::Value = toml::from_str("[jwt]\nissuer = \"a\"\n").unwrap();
        let applied =
            apply_env_fallbacks(&mut merged, &BTreeSet::new(), &env(&[("EVENTIDE_JWT_ISSUER", "")]));
        assert_eq!(applied, 0);
        assert_eq!(merged["jwt"]["issuer"].as_str(), Some("a"));
    }
}
