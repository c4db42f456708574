//! Front desk error types.

use innkeep_core::booking::BookingError;
use innkeep_core::guest::GuestError;
use innkeep_core::invoice::InvoiceError;
use innkeep_core::room::RoomError;
use innkeep_core::stay::StayError;
use innkeep_shared::{AppError, Permission, StaffRole};
use innkeep_store::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::FrontDesk`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    /// The actor's role lacks the permission.
    #[error("Role {role:?} lacks permission {permission}")]
    Forbidden {
        /// Permission required.
        permission: Permission,
        /// Role of the caller.
        role: StaffRole,
    },

    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Room rule violated.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Booking rule violated.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Invoice rule violated.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Guest rule violated.
    #[error(transparent)]
    Guest(#[from] GuestError),

    /// Stay orchestration failed.
    #[error(transparent)]
    Stay(#[from] StayError),
}

impl DeskError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden { .. } => 403,
            Self::Store(e) => e.status_code(),
            Self::Room(e) => e.status_code(),
            Self::Booking(e) => e.status_code(),
            Self::Invoice(e) => e.status_code(),
            Self::Guest(e) => e.status_code(),
            Self::Stay(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Store(e) => e.error_code(),
            Self::Room(e) => e.error_code(),
            Self::Booking(e) => e.error_code(),
            Self::Invoice(e) => e.error_code(),
            Self::Guest(e) => e.error_code(),
            Self::Stay(e) => e.error_code(),
        }
    }
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        Self::from_status(err.status_code(), err.to_string())
    }
}
