//! Store error types.

use thiserror::Error;

/// Errors raised by repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No document with that identity.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Document kind.
        kind: &'static str,
        /// Identity looked up.
        id: String,
    },

    /// Optimistic version check failed.
    #[error("{kind} {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        /// Document kind.
        kind: &'static str,
        /// Document identity.
        id: String,
        /// Version the caller read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// A unique key is already taken by another document.
    #[error("{kind} with {field} '{value}' already exists")]
    Duplicate {
        /// Document kind.
        kind: &'static str,
        /// Unique key name.
        field: &'static str,
        /// Key value.
        value: String,
    },
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } | Self::Duplicate { .. } => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "VERSION_CONFLICT",
            Self::Duplicate { .. } => "DUPLICATE",
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
