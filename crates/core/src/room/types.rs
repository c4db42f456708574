//! Room domain types.

use chrono::{DateTime, Utc};
use innkeep_shared::types::{Currency, RoomId, StaffId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of a room.
///
/// There is no enforced transition graph between these values; see
/// [`crate::room::RoomService::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Clean, inspected and sellable.
    Available,
    /// A guest is checked in.
    Occupied,
    /// Vacated and waiting for housekeeping.
    Dirty,
    /// Cleaned, not yet released for sale.
    Clean,
    /// Blocked for maintenance work.
    Maintenance,
    /// Unusable until further notice.
    OutOfOrder,
}

impl RoomStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Available,
        Self::Occupied,
        Self::Dirty,
        Self::Clean,
        Self::Maintenance,
        Self::OutOfOrder,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Dirty => "dirty",
            Self::Clean => "clean",
            Self::Maintenance => "maintenance",
            Self::OutOfOrder => "out_of_order",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "available" => Some(Self::Available),
            "occupied" => Some(Self::Occupied),
            "dirty" => Some(Self::Dirty),
            "clean" => Some(Self::Clean),
            "maintenance" => Some(Self::Maintenance),
            "out_of_order" => Some(Self::OutOfOrder),
            _ => None,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Single room.
    Single,
    /// Double room.
    Double,
    /// Twin room.
    Twin,
    /// Deluxe room.
    Deluxe,
    /// Suite.
    Suite,
    /// Family room.
    Family,
}

/// Kind of bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedKind {
    /// Single bed.
    Single,
    /// Double bed.
    Double,
    /// Queen bed.
    Queen,
    /// King bed.
    King,
    /// Sofa bed.
    SofaBed,
}

/// One line of a room's bed configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bed {
    /// Kind of bed.
    pub kind: BedKind,
    /// How many of them.
    pub count: u8,
}

/// Nightly pricing for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRate {
    /// Nightly rate before tax.
    pub base_rate: Decimal,
    /// Tax percentage applied to the base rate.
    pub tax_rate: Decimal,
    /// Currency of the rate.
    pub currency: Currency,
}

/// Current status plus who set it and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusRecord {
    /// Current status.
    pub current: RoomStatus,
    /// When the status last changed.
    pub last_updated: DateTime<Utc>,
    /// Staff member who last changed it; `None` for system-created rooms.
    pub updated_by: Option<StaffId>,
}

/// Housekeeping state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Housekeeping {
    /// When the room was last cleaned.
    pub last_cleaned: Option<DateTime<Utc>>,
    /// Who cleaned it.
    pub cleaned_by: Option<StaffId>,
    /// Notes left by housekeeping.
    pub notes: Option<String>,
    /// Whether maintenance has been requested.
    pub maintenance_required: bool,
    /// What needs fixing.
    pub maintenance_notes: Option<String>,
}

/// A sellable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Internal identifier.
    pub id: RoomId,
    /// Room number shown to guests; unique per property.
    pub room_number: String,
    /// Category.
    pub room_type: RoomType,
    /// Floor number.
    pub floor: i16,
    /// Maximum number of guests.
    pub capacity: u8,
    /// Beds in the room.
    pub beds: Vec<Bed>,
    /// Nightly pricing.
    pub rate: RoomRate,
    /// Status and audit trail.
    pub status: RoomStatusRecord,
    /// Housekeeping record.
    pub housekeeping: Housekeeping,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// False once the room has been retired. Rooms are never deleted.
    pub is_active: bool,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct CreateRoomInput {
    /// Room number.
    pub room_number: String,
    /// Category.
    pub room_type: RoomType,
    /// Floor.
    pub floor: i16,
    /// Maximum guests.
    pub capacity: u8,
    /// Beds.
    pub beds: Vec<Bed>,
    /// Nightly pricing.
    pub rate: RoomRate,
    /// Amenity labels.
    pub amenities: Vec<String>,
}
