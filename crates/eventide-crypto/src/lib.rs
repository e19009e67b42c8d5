//! Eventide Crypto - Credential derivation and key material.
//!
//! This crate provides:
//! - Salted, iterated PBKDF2-HMAC-SHA256 password credentials
//! - Constant-time credential verification
//! - Zeroized HMAC signing secrets for bearer tokens
//!
//! # Example
//!
//! ```
//! use eventide_crypto::{EncodedCredential, PasswordCredential};
//!
//! let credential = PasswordCredential::with_iterations(1_000).unwrap();
//! let encoded = credential.encode("pw1");
//!
//! // The stored text round-trips through the `salt.key.iterations` format.
//! let stored: EncodedCredential = encoded.to_string().parse().unwrap();
//! assert!(PasswordCredential::verify("pw1", &stored));
//! assert!(!PasswordCredential::verify("wrong", &stored));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod credential;
mod error;
mod secret;

pub use credential::{
    DEFAULT_ITERATIONS, EncodedCredential, KEY_LEN, MAX_ITERATIONS, PasswordCredential, SALT_LEN,
};
pub use error::{CryptoError, CryptoResult};
pub use secret::SigningSecret;
