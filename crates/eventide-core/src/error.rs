//! Error taxonomy returned by every service operation.

use thiserror::Error;

/// Caller-facing text for [`ServiceError::Unexpected`].
pub const UNEXPECTED_PUBLIC_MESSAGE: &str = "Something went wrong!";

/// Failures a service operation can report to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Caller input was malformed; carries every violation found.
    #[error("validation failed: {}", errors.join("; "))]
    Validation {
        /// Human-readable violations, in the order they were detected.
        errors: Vec<String>,
    },

    /// No valid identity was presented.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A valid identity lacks the rights for the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator failed. The detail is for logs only.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ServiceError {
    /// Build a validation error from a list of violations.
    pub fn validation<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Text that is safe to return to the caller.
    ///
    /// Unexpected failures never leak their internal detail.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { errors } => errors.join("; "),
            Self::Unauthorized(msg) | Self::Forbidden(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Unexpected(_) => UNEXPECTED_PUBLIC_MESSAGE.to_owned(),
        }
    }

    /// Short machine-readable kind, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// Violations carried by a validation error, empty for other kinds.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Validation { errors } => errors,
            _ => &[],
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
