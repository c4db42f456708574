//! Stay orchestration.
//!
//! Sequences the booking, room, invoice and guest transitions of a check-in
//! or check-out on an in-memory object graph. No I/O.

pub mod error;
pub mod service;

pub use error::StayError;
pub use service::{CheckoutSummary, StayService};
