//! Stay orchestration errors.

use thiserror::Error;

use crate::booking::BookingError;
use crate::guest::GuestError;
use crate::invoice::InvoiceError;
use crate::room::RoomError;

/// Errors raised while moving a stay across booking, room, invoice and guest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StayError {
    /// The documents passed in do not belong together.
    #[error("{entity} does not belong to booking {booking_number}")]
    Mismatch {
        /// Which document is wrong.
        entity: &'static str,
        /// Booking being processed.
        booking_number: String,
    },

    /// Booking transition failed.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Room check failed.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Invoice check failed.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Guest update failed.
    #[error(transparent)]
    Guest(#[from] GuestError),
}

impl StayError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Mismatch { .. } => 400,
            Self::Booking(e) => e.status_code(),
            Self::Room(e) => e.status_code(),
            Self::Invoice(e) => e.status_code(),
            Self::Guest(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Mismatch { .. } => "MISMATCHED_DOCUMENTS",
            Self::Booking(e) => e.error_code(),
            Self::Room(e) => e.error_code(),
            Self::Invoice(e) => e.error_code(),
            Self::Guest(e) => e.error_code(),
        }
    }
}
