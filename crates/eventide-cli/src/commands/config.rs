//! Config command - show and validate the effective configuration.

use std::process::ExitCode;

use eventide_config::{ConfigResult, ResolvedConfig};

/// Print the configuration with the signing key and seed credentials masked.
pub(crate) fn show(resolved: &ResolvedConfig, json: bool) -> anyhow::Result<()> {
    let redacted = resolved.config.redacted();
    let rendered = if json {
        serde_json::to_string_pretty(&redacted)?
    } else {
        toml::to_string_pretty(&redacted)?
    };

    match &resolved.loaded_file {
        Some(path) => println!("# loaded from {}", path.display()),
        None => println!("# built-in defaults"),
    }
    if resolved.env_overrides > 0 {
        println!("# {} value(s) from environment", resolved.env_overrides);
    }
    println!("{rendered}");
    Ok(())
}

/// Report whether configuration loaded cleanly.
pub(crate) fn validate(resolved: &ConfigResult<ResolvedConfig>) -> ExitCode {
    match resolved {
        Ok(r) => {
            let seeds = r.config.accounts.seed.len();
            println!("configuration is valid ({seeds} seed account(s))");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("configuration is invalid: {e}");
            ExitCode::FAILURE
        },
    }
}
