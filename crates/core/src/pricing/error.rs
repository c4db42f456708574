//! Pricing error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the tax calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A quantity, price or rate is outside its allowed range.
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount {
        /// Which input was rejected.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
}

impl PricingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
        }
    }
}
