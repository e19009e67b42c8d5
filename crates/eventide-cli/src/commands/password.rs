//! Password commands - derive and check stored credentials.

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::{Context, bail};
use eventide_crypto::PasswordCredential;

/// Take the password from the flag, or the first line of `reader`.
fn read_secret(flag: Option<String>, reader: impl BufRead) -> anyhow::Result<String> {
    let secret = match flag {
        Some(secret) => secret,
        None => reader
            .lines()
            .next()
            .transpose()
            .context("failed to read password from stdin")?
            .unwrap_or_default(),
    };
    let secret = secret.trim_end_matches(['\r', '\n']).to_owned();
    if secret.is_empty() {
        bail!("password must not be empty");
    }
    Ok(secret)
}

/// Print the encoded credential for a password.
pub(crate) async fn hash_password(flag: Option<String>, iterations: u32) -> anyhow::Result<()> {
    let secret = read_secret(flag, std::io::stdin().lock())?;
    let credential = PasswordCredential::with_iterations(iterations)?;

    let encoded = tokio::task::spawn_blocking(move || credential.encode(&secret))
        .await
        .context("credential derivation task failed")?;

    println!("{encoded}");
    Ok(())
}

/// Check a password against a stored credential.
///
/// Exits 0 on a match and 1 on a mismatch.
pub(crate) async fn verify_password(encoded: &str, flag: Option<String>) -> anyhow::Result<ExitCode> {
    let secret = read_secret(flag, std::io::stdin().lock())?;
    let encoded = encoded.to_owned();

    let matched = tokio::task::spawn_blocking(move || PasswordCredential::verify_encoded(&secret, &encoded))
        .await
        .context("credential verification task failed")??;

    if matched {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid");
        Ok(ExitCode::FAILURE)
    }
}
