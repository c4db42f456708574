//! Invoice error types.

use thiserror::Error;

use crate::pricing::PricingError;

/// Errors that can occur during invoice operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    /// The invoice has been cancelled and can no longer change.
    #[error("Invoice {invoice_number} is cancelled")]
    InvoiceCancelled {
        /// The invoice number.
        invoice_number: String,
    },

    /// Quantity, price, rate, payment or discount rejected.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl InvoiceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvoiceCancelled { .. } => 409,
            Self::Pricing(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvoiceCancelled { .. } => "INVOICE_CANCELLED",
            Self::Pricing(e) => e.error_code(),
        }
    }
}
