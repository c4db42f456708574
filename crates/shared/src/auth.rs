//! Staff identity and permissions.
//!
//! Credential issuance lives outside this workspace. What arrives here is an
//! already-authenticated [`Actor`]; the front desk checks its permissions
//! before every mutating call. The settlement engine itself never does.

use serde::{Deserialize, Serialize};

use crate::types::StaffId;

/// A mutating capability a staff account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create, check in, check out and cancel bookings.
    ManageReservations,
    /// Change room status, housekeeping and room inventory.
    ManageRooms,
    /// Post charges, payments and discounts to invoices.
    ManageBilling,
    /// Register guests and adjust loyalty balances.
    ManageGuests,
}

impl Permission {
    /// Returns the string representation of the permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageReservations => "manage_reservations",
            Self::ManageRooms => "manage_rooms",
            Self::ManageBilling => "manage_billing",
            Self::ManageGuests => "manage_guests",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff role. Each role maps to a fixed permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Reception: reservations, guests, and taking payments.
    FrontDesk,
    /// Room status and cleaning only.
    Housekeeping,
    /// Billing only.
    Accountant,
    /// Everything a property manager needs.
    Manager,
    /// Everything.
    Admin,
}

impl StaffRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "front_desk" => Some(Self::FrontDesk),
            "housekeeping" => Some(Self::Housekeeping),
            "accountant" => Some(Self::Accountant),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns true if the role grants `permission`.
    #[must_use]
    pub fn grants(self, permission: Permission) -> bool {
        use Permission::{ManageBilling, ManageGuests, ManageReservations, ManageRooms};

        match self {
            Self::Manager | Self::Admin => true,
            Self::FrontDesk => matches!(
                permission,
                ManageReservations | ManageGuests | ManageBilling
            ),
            Self::Housekeeping => permission == ManageRooms,
            Self::Accountant => permission == ManageBilling,
        }
    }
}

/// An authenticated staff member performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The staff account.
    pub staff_id: StaffId,
    /// The account's role.
    pub role: StaffRole,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(staff_id: StaffId, role: StaffRole) -> Self {
        Self { staff_id, role }
    }

    /// Returns true if the actor may perform actions guarded by `permission`.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.role.grants(permission)
    }
}
