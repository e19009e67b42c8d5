//! Owner lookup error types.

use eventide_core::UserId;
use thiserror::Error;

/// Failures confirming an account through an [`IdentityLookup`](crate::IdentityLookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The account does not exist.
    #[error("account not found: {0}")]
    NotFound(UserId),

    /// The remote service answered with a non-success status.
    #[error("account service returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed.
    #[error("account service request failed: {0}")]
    Transport(String),

    /// A local failure while performing the lookup.
    #[error("lookup failed: {0}")]
    Internal(String),
}

/// Result type for owner lookups.
pub type LookupResult<T> = Result<T, LookupError>;
