//! Storage error types.

use eventide_core::ServiceError;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Internal(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::NotFound(what),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_service_error() {
        let err: ServiceError = StorageError::NotFound("event".to_owned()).into();
        assert_eq!(err, ServiceError::NotFound("event".to_owned()));

        let err: ServiceError = StorageError::Internal("lock poisoned".to_owned()).into();
        assert!(matches!(err, ServiceError::Unexpected(detail) if detail.contains("lock poisoned")));

        let err: ServiceError = StorageError::Conflict("name taken".to_owned()).into();
        assert_eq!(err.kind(), "unexpected");
    }
}
