//! Room status transitions and housekeeping.

use chrono::{DateTime, Utc};
use innkeep_shared::types::{RoomId, StaffId};
use rust_decimal::Decimal;

use crate::pricing::{PricingError, TaxCalculator};
use crate::room::error::RoomError;
use crate::room::types::{CreateRoomInput, Housekeeping, Room, RoomStatus, RoomStatusRecord};

/// Stateless service for room status changes.
pub struct RoomService;

impl RoomService {
    /// Builds a new, active, available room.
    ///
    /// # Errors
    ///
    /// Returns `RoomError` if the room number is blank, capacity is zero, or
    /// the base or tax rate is negative.
    pub fn create(input: CreateRoomInput, now: DateTime<Utc>) -> Result<Room, RoomError> {
        let room_number = input.room_number.trim().to_string();
        if room_number.is_empty() {
            return Err(RoomError::RoomNumberRequired);
        }
        if input.capacity == 0 {
            return Err(RoomError::InvalidCapacity);
        }
        TaxCalculator::ensure_non_negative("base_rate", input.rate.base_rate)?;
        TaxCalculator::ensure_non_negative("tax_rate", input.rate.tax_rate)?;

        Ok(Room {
            id: RoomId::new(),
            room_number,
            room_type: input.room_type,
            floor: input.floor,
            capacity: input.capacity,
            beds: input.beds,
            rate: input.rate,
            status: RoomStatusRecord {
                current: RoomStatus::Available,
                last_updated: now,
                updated_by: None,
            },
            housekeeping: Housekeeping::default(),
            amenities: input.amenities,
            is_active: true,
            created_at: now,
        })
    }

    /// Sets the room's status. The single entry point for every status change.
    pub fn set_status(room: &mut Room, new_status: RoomStatus, actor: StaffId, now: DateTime<Utc>) {
        room.status = RoomStatusRecord {
            current: new_status,
            last_updated: now,
            updated_by: Some(actor),
        };
    }

    /// Records a completed cleaning and marks the room `clean`.
    pub fn mark_cleaned(
        room: &mut Room,
        housekeeper: StaffId,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) {
        room.housekeeping.last_cleaned = Some(now);
        room.housekeeping.cleaned_by = Some(housekeeper);
        room.housekeeping.notes = notes;
        Self::set_status(room, RoomStatus::Clean, housekeeper, now);
    }

    /// Flags the room for maintenance and takes it out of sale.
    pub fn report_maintenance(room: &mut Room, notes: String, actor: StaffId, now: DateTime<Utc>) {
        room.housekeeping.maintenance_required = true;
        room.housekeeping.maintenance_notes = Some(notes);
        Self::set_status(room, RoomStatus::Maintenance, actor, now);
    }

    /// Clears the maintenance flag. The room goes back to housekeeping as `dirty`.
    pub fn complete_maintenance(room: &mut Room, actor: StaffId, now: DateTime<Utc>) {
        room.housekeeping.maintenance_required = false;
        room.housekeeping.maintenance_notes = None;
        Self::set_status(room, RoomStatus::Dirty, actor, now);
    }

    /// Retires the room. Status is left untouched.
    pub fn deactivate(room: &mut Room) {
        room.is_active = false;
    }

    /// Returns a retired room to the inventory.
    pub fn activate(room: &mut Room) {
        room.is_active = true;
    }

    /// True iff the room may be attached to a new booking.
    #[must_use]
    pub fn is_available(room: &Room) -> bool {
        room.status.current == RoomStatus::Available && room.is_active
    }

    /// Fallible form of [`Self::is_available`].
    ///
    /// # Errors
    ///
    /// Returns `RoomError::Inactive` or `RoomError::NotAvailable`.
    pub fn ensure_available(room: &Room) -> Result<(), RoomError> {
        if !room.is_active {
            return Err(RoomError::Inactive {
                room_number: room.room_number.clone(),
            });
        }
        if room.status.current != RoomStatus::Available {
            return Err(RoomError::NotAvailable {
                room_number: room.room_number.clone(),
                status: room.status.current,
            });
        }
        Ok(())
    }

    /// All-in nightly rate (base + tax) for quoting.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if the stored rates are negative.
    pub fn total_rate(room: &Room) -> Result<Decimal, PricingError> {
        TaxCalculator::room_total_rate(room.rate.base_rate, room.rate.tax_rate, room.rate.currency)
    }
}
