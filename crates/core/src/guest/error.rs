//! Guest error types.

use thiserror::Error;

use crate::pricing::PricingError;

/// Errors that can occur during guest operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestError {
    /// Email is blank or malformed.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// First or last name is blank.
    #[error("Guest first and last name are required")]
    NameRequired,

    /// Redemption exceeds the balance.
    #[error("Insufficient loyalty points: requested {requested}, available {available}")]
    InsufficientPoints {
        /// Points asked for.
        requested: u64,
        /// Points held.
        available: u64,
    },

    /// Revenue rejected.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl GuestError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidEmail(_) | Self::NameRequired => 400,
            Self::InsufficientPoints { .. } => 422,
            Self::Pricing(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::NameRequired => "NAME_REQUIRED",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::Pricing(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_points_error() {
        let err = GuestError::InsufficientPoints {
            requested: 500,
            available: 120,
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_POINTS");
        assert!(err.to_string().contains("500"));
    }
}
