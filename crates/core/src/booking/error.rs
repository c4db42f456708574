//! Booking error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::booking::types::BookingStatus;
use crate::pricing::PricingError;
use crate::room::RoomError;

/// Errors that can occur during booking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BookingStatus,
        /// The attempted target status.
        to: BookingStatus,
    },

    /// Check-out is not after check-in.
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        /// Requested arrival.
        check_in: DateTime<Utc>,
        /// Requested departure.
        check_out: DateTime<Utc>,
    },

    /// At least one adult must be on the booking.
    #[error("A booking needs at least one adult")]
    InvalidOccupancy,

    /// More guests than the room holds.
    #[error("{guests} guests exceed room capacity of {capacity}")]
    ExceedsCapacity {
        /// Requested head count.
        guests: u16,
        /// Room capacity.
        capacity: u8,
    },

    /// An amount was rejected.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The room cannot take the booking.
    #[error(transparent)]
    Room(#[from] RoomError),
}

impl BookingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::InvalidDateRange { .. }
            | Self::InvalidOccupancy
            | Self::ExceedsCapacity { .. } => 400,
            Self::Pricing(e) => e.status_code(),
            Self::Room(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidOccupancy => "INVALID_OCCUPANCY",
            Self::ExceedsCapacity { .. } => "EXCEEDS_CAPACITY",
            Self::Pricing(e) => e.error_code(),
            Self::Room(e) => e.error_code(),
        }
    }
}
