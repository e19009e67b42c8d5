//! Eventide CLI - credential, token, and configuration tooling.
//!
//! Hashes and checks passwords in the stored credential format, issues and
//! inspects bearer tokens with the configured signing key, and shows the
//! effective configuration.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config_bridge;

use commands::{config, password, token};

/// Eventide - event scheduling platform tools
#[derive(Parser)]
#[command(name = "eventide")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "EVENTIDE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a stored credential from a password
    HashPassword {
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// PBKDF2 iteration count
        #[arg(long, default_value_t = eventide_crypto::DEFAULT_ITERATIONS)]
        iterations: u32,
    },

    /// Check a password against a stored credential (exit 1 on mismatch)
    VerifyPassword {
        /// Stored credential in `salt.key.iterations` form
        #[arg(long)]
        encoded: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign a bearer token with the configured key
    IssueToken {
        /// Subject account id
        #[arg(long)]
        user_id: String,

        /// Subject login name
        #[arg(long)]
        name: String,

        /// Subject role: Admin or User
        #[arg(long, default_value = "User")]
        role: String,
    },

    /// Verify a bearer token and print its claims
    VerifyToken {
        /// Compact serialized token
        token: String,
    },

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration with secrets redacted
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Load and validate configuration, reporting the first problem
    Validate,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let resolved = eventide_config::Config::load(cli.config.as_deref());

    let log_config = match &resolved {
        Ok(r) => {
            let mut lc = config_bridge::to_log_config(&r.config);
            if cli.verbose {
                "debug".clone_into(&mut lc.level);
            }
            lc
        },
        Err(_) => {
            let level = if cli.verbose { "debug" } else { "warn" };
            eventide_telemetry::LogConfig::new(level)
        },
    };
    if let Err(e) = eventide_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::HashPassword {
            password: secret,
            iterations,
        } => {
            password::hash_password(secret, iterations).await?;
        },
        Commands::VerifyPassword {
            encoded,
            password: secret,
        } => {
            return password::verify_password(&encoded, secret).await;
        },
        Commands::IssueToken {
            user_id,
            name,
            role,
        } => {
            token::issue_token(&resolved?.config, &user_id, &name, &role)?;
        },
        Commands::VerifyToken { token: raw } => {
            token::verify_token(&resolved?.config, &raw)?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show { json } => config::show(&resolved?, json)?,
            ConfigCommands::Validate => return Ok(config::validate(&resolved)),
        },
    }

    Ok(ExitCode::SUCCESS)
}
