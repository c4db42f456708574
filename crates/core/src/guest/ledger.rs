//! Guest statistics and loyalty.

use chrono::{DateTime, Utc};
use innkeep_shared::types::GuestId;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::guest::error::GuestError;
use crate::guest::types::{CreateGuestInput, Guest, GuestStatistics, Loyalty, LoyaltyTier};
use crate::pricing::TaxCalculator;

/// Points needed for each tier above bronze, highest first.
const TIER_THRESHOLDS: [(u64, LoyaltyTier); 3] = [
    (10_000, LoyaltyTier::Platinum),
    (5_000, LoyaltyTier::Gold),
    (2_000, LoyaltyTier::Silver),
];

/// Stateless service for guest profiles, statistics and loyalty.
pub struct GuestLedger;

impl GuestLedger {
    /// Builds a new bronze-tier guest with empty statistics.
    ///
    /// # Errors
    ///
    /// Returns `GuestError::InvalidEmail` or `GuestError::NameRequired`.
    pub fn register(input: CreateGuestInput, now: DateTime<Utc>) -> Result<Guest, GuestError> {
        let email = input.email.trim().to_lowercase();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(GuestError::InvalidEmail(input.email));
        }

        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(GuestError::NameRequired);
        }

        Ok(Guest {
            id: GuestId::new(),
            email,
            first_name,
            last_name,
            phone: input.phone,
            company: input.company,
            is_vip: input.is_vip,
            preferences: input.preferences,
            loyalty: Loyalty::default(),
            statistics: GuestStatistics::default(),
            created_at: now,
        })
    }

    /// Folds one completed stay into the guest's statistics.
    ///
    /// The average is a running mean over the previous average, rounded to
    /// two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `GuestError::Pricing` if `revenue` is negative.
    pub fn record_completed_stay(
        guest: &mut Guest,
        revenue: Decimal,
        stay_nights: u32,
        now: DateTime<Utc>,
    ) -> Result<(), GuestError> {
        TaxCalculator::ensure_non_negative("revenue", revenue)?;

        let stats = &mut guest.statistics;
        let previous = Decimal::from(stats.total_bookings);
        stats.total_bookings += 1;
        let count = Decimal::from(stats.total_bookings);

        stats.total_revenue += revenue;
        stats.average_stay_duration = ((stats.average_stay_duration * previous
            + Decimal::from(stay_nights))
            / count)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        stats.last_stay_date = Some(now);
        Ok(())
    }

    /// Adds points and raises the tier if a threshold is crossed.
    pub fn add_loyalty_points(guest: &mut Guest, points: u64) {
        guest.loyalty.points = guest.loyalty.points.saturating_add(points);
        let earned = Self::tier_for_points(guest.loyalty.points);
        if earned > guest.loyalty.tier {
            guest.loyalty.tier = earned;
        }
    }

    /// Spends points. The tier is kept.
    ///
    /// # Errors
    ///
    /// Returns `GuestError::InsufficientPoints` if the guest holds fewer than `points`.
    pub fn redeem_points(guest: &mut Guest, points: u64) -> Result<(), GuestError> {
        let available = guest.loyalty.points;
        guest.loyalty.points =
            available
                .checked_sub(points)
                .ok_or(GuestError::InsufficientPoints {
                    requested: points,
                    available,
                })?;
        Ok(())
    }

    /// Highest tier whose threshold `points` reaches.
    #[must_use]
    pub fn tier_for_points(points: u64) -> LoyaltyTier {
        TIER_THRESHOLDS
            .iter()
            .find(|(threshold, _)| points >= *threshold)
            .map_or(LoyaltyTier::Bronze, |(_, tier)| *tier)
    }

    /// Points earned for `revenue`: whole currency units times the rate.
    ///
    /// Negative revenue earns nothing.
    #[must_use]
    pub fn points_for_revenue(revenue: Decimal, points_per_unit: u64) -> u64 {
        let whole_units = revenue.floor();
        if whole_units <= Decimal::ZERO {
            return 0;
        }
        u64::try_from(whole_units)
            .unwrap_or(u64::MAX)
            .saturating_mul(points_per_unit)
    }
}
