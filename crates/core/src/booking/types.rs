//! Booking domain types.
//!
//! A booking moves `confirmed → checked_in → checked_out`, or ends early in
//! `cancelled` / `no_show`. The three end states are terminal.

use chrono::{DateTime, Utc};
use innkeep_shared::types::{BookingId, Currency, GuestId, Money, PaymentId, RoomId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::room::RoomStatus;

/// Booking status in the stay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reserved, guest not yet arrived.
    Confirmed,
    /// Guest is in the room.
    CheckedIn,
    /// Stay completed (terminal).
    CheckedOut,
    /// Cancelled before arrival (terminal).
    Cancelled,
    /// Guest never arrived (terminal).
    NoShow,
}

impl BookingStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Confirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confirmed" => Some(Self::Confirmed),
            "checked_in" => Some(Self::CheckedIn),
            "checked_out" => Some(Self::CheckedOut),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled | Self::NoShow)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel the booking came through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingChannel {
    /// Property website or app.
    #[default]
    Direct,
    /// Guest walked up to the desk.
    WalkIn,
    /// Telephone reservation.
    Phone,
    /// Online travel agency.
    Ota,
    /// Corporate account.
    Corporate,
}

/// Where a booking originated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSource {
    /// Sales channel.
    pub channel: BookingChannel,
    /// OTA name when `channel` is `Ota`.
    pub ota_name: Option<String>,
    /// The OTA's own reference for the booking.
    pub ota_reference: Option<String>,
}

/// Guests staying in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    /// Adults; at least one.
    pub adults: u8,
    /// Children.
    pub children: u8,
}

impl Occupancy {
    /// Total head count.
    #[must_use]
    pub fn total(&self) -> u16 {
        u16::from(self.adults) + u16::from(self.children)
    }
}

/// Quoted price of the stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPricing {
    /// Nightly rate before tax.
    pub room_rate: Decimal,
    /// Tax percentage applied to the room rate.
    pub tax_rate: Decimal,
    /// Number of nights, at least one.
    pub total_nights: u32,
    /// Rate times nights.
    pub subtotal: Decimal,
    /// Tax on the subtotal.
    pub taxes: Decimal,
    /// Discount granted at reservation time.
    pub discounts: Decimal,
    /// Subtotal plus taxes minus discounts.
    pub total_amount: Decimal,
    /// Currency of every amount above.
    pub currency: Currency,
}

impl BookingPricing {
    /// The booking total with its currency.
    #[must_use]
    pub const fn total(&self) -> Money {
        Money::new(self.total_amount, self.currency)
    }
}

/// Current status plus who set it and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusRecord {
    /// Current status.
    pub current: BookingStatus,
    /// When the status last changed.
    pub last_updated: DateTime<Utc>,
    /// Staff member who last changed it.
    pub updated_by: StaffId,
}

/// How a payment was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the desk.
    Cash,
    /// Credit or debit card.
    Card,
    /// Bank transfer.
    BankTransfer,
    /// Online payment gateway.
    Online,
    /// Gift voucher or prepaid credit.
    Voucher,
}

/// A payment taken against a booking (deposit, prepayment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayment {
    /// Payment identifier.
    pub id: PaymentId,
    /// Amount received; always positive.
    pub amount: Decimal,
    /// Tender.
    pub method: PaymentMethod,
    /// Processor or receipt reference.
    pub reference: Option<String>,
    /// When the money was received.
    pub received_at: DateTime<Utc>,
}

/// Cancellation record. Empty until the booking is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// Whether the booking has been cancelled.
    pub is_cancelled: bool,
    /// When it was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Who cancelled it.
    pub cancelled_by: Option<StaffId>,
    /// Why.
    pub reason: Option<String>,
    /// Amount to return to the guest.
    pub refund_amount: Decimal,
    /// Amount retained as a penalty.
    pub cancellation_fee: Decimal,
}

/// A reservation of one room for one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Internal identifier.
    pub id: BookingId,
    /// Human-facing booking number (`BK…`), unique.
    pub booking_number: String,
    /// Guest (shared, not owned).
    pub guest_id: GuestId,
    /// Room (shared, not owned).
    pub room_id: RoomId,
    /// Requested arrival.
    pub check_in: DateTime<Utc>,
    /// Requested departure; always after `check_in`.
    pub check_out: DateTime<Utc>,
    /// When the guest actually checked in.
    pub actual_check_in: Option<DateTime<Utc>>,
    /// When the guest actually checked out.
    pub actual_check_out: Option<DateTime<Utc>>,
    /// Head count.
    pub occupancy: Occupancy,
    /// Quoted price.
    pub pricing: BookingPricing,
    /// Channel metadata.
    pub source: BookingSource,
    /// Status and audit trail.
    pub status: BookingStatusRecord,
    /// Payments taken against the booking.
    pub payments: Vec<BookingPayment>,
    /// Cancellation record.
    pub cancellation: Cancellation,
    /// Free-text requests from the guest.
    pub special_requests: Option<String>,
    /// When the booking was made.
    pub created_at: DateTime<Utc>,
    /// Who made it.
    pub created_by: StaffId,
}

/// Input for reserving a room.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// The guest the booking is for.
    pub guest_id: GuestId,
    /// Requested arrival.
    pub check_in: DateTime<Utc>,
    /// Requested departure.
    pub check_out: DateTime<Utc>,
    /// Head count.
    pub occupancy: Occupancy,
    /// Channel metadata.
    pub source: BookingSource,
    /// Discount off the quoted total.
    pub discount: Decimal,
    /// Free-text requests.
    pub special_requests: Option<String>,
}

/// A validated booking transition with its audit data.
///
/// Produced by [`crate::booking::BookingService`]; applying it is a separate
/// step so callers can sequence it with the room and guest updates it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    /// Guest arrived.
    CheckIn {
        /// Status after the transition.
        new_status: BookingStatus,
        /// Room that must become occupied.
        room_id: RoomId,
        /// Staff member who checked the guest in.
        checked_in_by: StaffId,
        /// Actual arrival time.
        checked_in_at: DateTime<Utc>,
    },
    /// Guest departed.
    CheckOut {
        /// Status after the transition.
        new_status: BookingStatus,
        /// Room that must go to housekeeping.
        room_id: RoomId,
        /// Guest whose statistics must be updated.
        guest_id: GuestId,
        /// Nights of the completed stay.
        total_nights: u32,
        /// Staff member who checked the guest out.
        checked_out_by: StaffId,
        /// Actual departure time.
        checked_out_at: DateTime<Utc>,
    },
    /// Booking called off before arrival.
    Cancel {
        /// Status after the transition.
        new_status: BookingStatus,
        /// Staff member who cancelled.
        cancelled_by: StaffId,
        /// When.
        cancelled_at: DateTime<Utc>,
        /// Why.
        reason: String,
        /// Amount to return.
        refund_amount: Decimal,
        /// Penalty retained.
        cancellation_fee: Decimal,
    },
}

impl BookingAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> BookingStatus {
        match self {
            Self::CheckIn { new_status, .. }
            | Self::CheckOut { new_status, .. }
            | Self::Cancel { new_status, .. } => *new_status,
        }
    }

    /// The room status change this action requires, if any.
    #[must_use]
    pub fn room_status_request(&self) -> Option<(RoomId, RoomStatus)> {
        match self {
            Self::CheckIn { room_id, .. } => Some((*room_id, RoomStatus::Occupied)),
            Self::CheckOut { room_id, .. } => Some((*room_id, RoomStatus::Dirty)),
            Self::Cancel { .. } => None,
        }
    }

    /// Nights to credit the guest with. Only a check-out completes a stay.
    #[must_use]
    pub fn completed_nights(&self) -> Option<u32> {
        match self {
            Self::CheckOut { total_nights, .. } => Some(*total_nights),
            Self::CheckIn { .. } | Self::Cancel { .. } => None,
        }
    }
}

/// Fee and refund computed for a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationTerms {
    /// Penalty retained.
    pub fee: Decimal,
    /// Amount to return to the guest.
    pub refund: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str_round_trips() {
        for status in BookingStatus::ALL {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("CHECKED_IN"), Some(BookingStatus::CheckedIn));
        assert_eq!(BookingStatus::parse("pending"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::CheckedIn.is_terminal());
        assert!(BookingStatus::CheckedOut.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::NoShow.is_terminal());
    }

    #[test]
    fn test_occupancy_total() {
        let occupancy = Occupancy {
            adults: 2,
            children: 3,
        };
        assert_eq!(occupancy.total(), 5);
    }

    #[test]
    fn test_room_status_request() {
        let room_id = RoomId::new();
        let check_in = BookingAction::CheckIn {
            new_status: BookingStatus::CheckedIn,
            room_id,
            checked_in_by: StaffId::new(),
            checked_in_at: Utc::now(),
        };
        assert_eq!(
            check_in.room_status_request(),
            Some((room_id, RoomStatus::Occupied))
        );

        let cancel = BookingAction::Cancel {
            new_status: BookingStatus::Cancelled,
            cancelled_by: StaffId::new(),
            cancelled_at: Utc::now(),
            reason: "Change of plans".to_string(),
            refund_amount: Decimal::ZERO,
            cancellation_fee: Decimal::ZERO,
        };
        assert_eq!(cancel.room_status_request(), None);
        assert_eq!(cancel.new_status(), BookingStatus::Cancelled);
    }
}
