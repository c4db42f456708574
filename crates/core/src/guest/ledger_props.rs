//! Property-based tests for GuestLedger.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::guest::ledger::GuestLedger;
use crate::guest::ledger::tests::sample_guest;
use crate::room::service::tests::at;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// More points never means a lower tier
    #[test]
    fn prop_tier_is_monotonic(a in 0u64..20_000, b in 0u64..20_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(GuestLedger::tier_for_points(low) <= GuestLedger::tier_for_points(high));
    }

    /// The tier never decreases across any earn/redeem sequence
    #[test]
    fn prop_tier_never_downgrades(
        ops in prop::collection::vec((any::<bool>(), 0u64..4_000), 1..20),
    ) {
        let mut guest = sample_guest();
        let mut highest = guest.loyalty.tier;
        for (earn, points) in ops {
            if earn {
                GuestLedger::add_loyalty_points(&mut guest, points);
            } else {
                let _ = GuestLedger::redeem_points(&mut guest, points);
            }
            prop_assert!(guest.loyalty.tier >= highest);
            highest = guest.loyalty.tier;
        }
    }

    /// Totals accumulate and the average stays between the shortest and longest stay
    #[test]
    fn prop_statistics_accumulate(
        stays in prop::collection::vec((0i64..1_000_000, 1u32..30), 1..10),
    ) {
        let mut guest = sample_guest();
        for (cents, nights) in &stays {
            let revenue = Decimal::new(*cents, 2);
            GuestLedger::record_completed_stay(&mut guest, revenue, *nights, at(10, 0)).unwrap();
        }
        let revenue: Decimal = stays.iter().map(|(cents, _)| Decimal::new(*cents, 2)).sum();
        let shortest = stays.iter().map(|(_, n)| *n).min().unwrap_or(0);
        let longest = stays.iter().map(|(_, n)| *n).max().unwrap_or(0);

        prop_assert_eq!(guest.statistics.total_bookings as usize, stays.len());
        prop_assert_eq!(guest.statistics.total_revenue, revenue);
        let average = guest.statistics.average_stay_duration;
        prop_assert!(average >= Decimal::from(shortest) - Decimal::new(1, 1));
        prop_assert!(average <= Decimal::from(longest) + Decimal::new(1, 1));
    }
}
