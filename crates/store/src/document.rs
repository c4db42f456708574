//! Storable documents and their versions.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use innkeep_core::booking::Booking;
use innkeep_core::guest::Guest;
use innkeep_core::invoice::Invoice;
use innkeep_core::room::Room;
use innkeep_shared::types::{BookingId, GuestId, InvoiceId, RoomId};
use serde::{Deserialize, Serialize};

/// A document as stored, with the version it was read at.
///
/// Versions start at 1 on insert and increase by one on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Stored version.
    pub version: u64,
    /// The document.
    pub value: T,
}

/// Unique key name for room numbers.
pub const ROOM_NUMBER: &str = "room_number";
/// Unique key name for booking numbers.
pub const BOOKING_NUMBER: &str = "booking_number";
/// Unique key name for invoice numbers.
pub const INVOICE_NUMBER: &str = "invoice_number";
/// Unique key name for the booking an invoice belongs to.
pub const INVOICE_BOOKING: &str = "booking_id";
/// Unique key name for guest emails.
pub const GUEST_EMAIL: &str = "email";

/// A document the store can hold.
pub trait Document: Clone + Debug + Send + Sync + 'static {
    /// Identity type.
    type Id: Copy + Eq + Ord + Hash + Display + Debug + Send + Sync + 'static;

    /// Kind name used in errors and logs.
    const KIND: &'static str;

    /// Identity of this document.
    fn id(&self) -> Self::Id;

    /// Secondary keys that must be unique across all documents of this kind.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl Document for Room {
    type Id = RoomId;
    const KIND: &'static str = "room";

    fn id(&self) -> RoomId {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![(ROOM_NUMBER, self.room_number.clone())]
    }
}

impl Document for Booking {
    type Id = BookingId;
    const KIND: &'static str = "booking";

    fn id(&self) -> BookingId {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![(BOOKING_NUMBER, self.booking_number.clone())]
    }
}

impl Document for Invoice {
    type Id = InvoiceId;
    const KIND: &'static str = "invoice";

    fn id(&self) -> InvoiceId {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![
            (INVOICE_NUMBER, self.invoice_number.clone()),
            (INVOICE_BOOKING, self.booking_id.to_string()),
        ]
    }
}

impl Document for Guest {
    type Id = GuestId;
    const KIND: &'static str = "guest";

    fn id(&self) -> GuestId {
        self.id
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![(GUEST_EMAIL, self.email.clone())]
    }
}
