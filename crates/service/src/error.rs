//! Typed error enum for the service layer.

use envvars_core::ValidationError;
use envvars_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage and validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, conflict, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (empty key, over-long value).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_conflict())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
