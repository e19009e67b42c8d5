//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during credential and key handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// An encoded credential could not be parsed.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// Iteration count outside the accepted range.
    #[error("invalid iteration count {actual}: must be between 1 and {max}")]
    InvalidIterations {
        /// The rejected count.
        actual: u32,
        /// Largest accepted count.
        max: u32,
    },

    /// Signing secret too short.
    #[error("signing secret too short: need at least {min} bytes, got {actual}")]
    WeakSecret {
        /// Minimum length in bytes.
        min: usize,
        /// Actual length in bytes.
        actual: usize,
    },
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
