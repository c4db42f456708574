//! Room error types.

use thiserror::Error;

use crate::pricing::PricingError;
use crate::room::types::RoomStatus;

/// Errors that can occur during room operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// Room is not in `available` status.
    #[error("Room {room_number} is not available (status: {status})")]
    NotAvailable {
        /// The room number.
        room_number: String,
        /// The room's current status.
        status: RoomStatus,
    },

    /// Room has been deactivated.
    #[error("Room {room_number} is inactive")]
    Inactive {
        /// The room number.
        room_number: String,
    },

    /// Room capacity must be at least one guest.
    #[error("Room capacity must be at least 1")]
    InvalidCapacity,

    /// Room number is blank.
    #[error("Room number is required")]
    RoomNumberRequired,

    /// Base rate or tax rate rejected by the calculator.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl RoomError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotAvailable { .. } | Self::Inactive { .. } => 409,
            Self::InvalidCapacity | Self::RoomNumberRequired => 400,
            Self::Pricing(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAvailable { .. } | Self::Inactive { .. } => "NOT_AVAILABLE",
            Self::InvalidCapacity => "INVALID_CAPACITY",
            Self::RoomNumberRequired => "ROOM_NUMBER_REQUIRED",
            Self::Pricing(e) => e.error_code(),
        }
    }
}
