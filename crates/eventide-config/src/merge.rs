use std::collections::BTreeSet;

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
///
/// Every leaf path the overlay sets (e.g. `"jwt.key"`) is added to `set_paths`.
pub fn deep_merge(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    set_paths: &mut BTreeSet<String>,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() && base_val.is_table() => {
                        deep_merge(base_val, overlay_val, &path, set_paths);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        set_paths.insert(path);
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, set_paths);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            set_paths.insert(prefix.to_owned());
        },
    }
}

fn record_leaves(val: &toml::Value, prefix: &str, set_paths: &mut BTreeSet<String>) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &format!("{prefix}.{key}"), set_paths);
        }
    } else {
        set_paths.insert(prefix.to_owned());
    }
}
