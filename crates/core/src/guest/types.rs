//! Guest profile types.

use chrono::{DateTime, Utc};
use innkeep_shared::types::GuestId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::room::RoomType;

/// Loyalty tier. Ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltyTier {
    /// Entry tier.
    #[default]
    Bronze,
    /// 2,000 points.
    Silver,
    /// 5,000 points.
    Gold,
    /// 10,000 points.
    Platinum,
}

impl LoyaltyTier {
    /// Returns the string representation of the tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loyalty balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loyalty {
    /// Points held.
    pub points: u64,
    /// Tier reached. Never lowered automatically.
    pub tier: LoyaltyTier,
}

/// Lifetime stay statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestStatistics {
    /// Completed stays.
    pub total_bookings: u32,
    /// Revenue realised across completed stays.
    pub total_revenue: Decimal,
    /// Mean nights per completed stay, two decimal places.
    pub average_stay_duration: Decimal,
    /// When the last stay completed.
    pub last_stay_date: Option<DateTime<Utc>>,
}

/// Stay preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPreferences {
    /// Preferred room category.
    pub room_type: Option<RoomType>,
    /// Wants a smoking room.
    pub smoking: bool,
    /// Free-text notes for the desk.
    pub notes: Option<String>,
}

/// A guest profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Internal identifier.
    pub id: GuestId,
    /// Lower-cased email; unique per property.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact number.
    pub phone: Option<String>,
    /// Employer, for corporate billing.
    pub company: Option<String>,
    /// VIP flag.
    pub is_vip: bool,
    /// Preferences.
    pub preferences: GuestPreferences,
    /// Loyalty balance.
    pub loyalty: Loyalty,
    /// Stay statistics.
    pub statistics: GuestStatistics,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for registering a guest.
#[derive(Debug, Clone, Default)]
pub struct CreateGuestInput {
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact number.
    pub phone: Option<String>,
    /// Employer.
    pub company: Option<String>,
    /// VIP flag.
    pub is_vip: bool,
    /// Preferences.
    pub preferences: GuestPreferences,
}
