//! Booking lifecycle.
//!
//! A booking moves `confirmed → checked_in → checked_out`, or leaves
//! `confirmed` for `cancelled` or `no_show`. Transitions are produced by
//! [`BookingService`] as [`BookingAction`] values and written with
//! [`BookingService::apply`].

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::BookingError;
pub use service::{BookingService, CancellationPolicy};
pub use types::{
    Booking, BookingAction, BookingChannel, BookingPayment, BookingPricing, BookingSource,
    BookingStatus, BookingStatusRecord, Cancellation, CancellationTerms, CreateBookingInput,
    Occupancy, PaymentMethod,
};
