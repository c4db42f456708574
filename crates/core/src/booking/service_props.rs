//! Property-based tests for BookingService.

use chrono::{DateTime, Duration, TimeZone, Utc};
use innkeep_shared::types::StaffId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::booking::service::tests::{booking_input, sample_booking};
use crate::booking::service::{BookingService, CancellationPolicy};
use crate::booking::types::{BookingStatus, PaymentMethod};
use crate::room::service::tests::sample_room;

fn arb_status() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::CheckedIn),
        Just(BookingStatus::CheckedOut),
        Just(BookingStatus::Cancelled),
        Just(BookingStatus::NoShow),
    ]
}

/// Instants across 2024, to the second.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..31_536_000).prop_map(|secs| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
    })
}

/// Stay lengths from one second to sixty days.
fn arb_stay_seconds() -> impl Strategy<Value = i64> {
    1i64..=5_184_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// nights = ceil(seconds / 86400) for every positive span
    #[test]
    fn prop_nights_is_ceiling_of_days(start in arb_instant(), secs in arb_stay_seconds()) {
        let nights =
            BookingService::calculate_total_nights(start, start + Duration::seconds(secs)).unwrap();
        let expected = (secs + 86_399) / 86_400;
        prop_assert_eq!(i64::from(nights), expected);
        prop_assert!(nights >= 1);
    }

    /// Non-positive spans are always rejected
    #[test]
    fn prop_nights_rejects_non_positive_span(start in arb_instant(), secs in 0i64..1_000_000) {
        let check_out = start - Duration::seconds(secs);
        prop_assert!(BookingService::calculate_total_nights(start, check_out).is_err());
    }

    /// Terminal statuses have no outgoing transitions
    #[test]
    fn prop_terminal_statuses_are_final(from in arb_status(), to in arb_status()) {
        if from.is_terminal() {
            prop_assert!(!BookingService::is_valid_transition(from, to));
        }
    }

    /// No status transitions to itself
    #[test]
    fn prop_no_self_transition(status in arb_status()) {
        prop_assert!(!BookingService::is_valid_transition(status, status));
    }

    /// Reserving prices the stay at nights * rate with tax on top
    #[test]
    fn prop_reserve_total_matches_nights(start in arb_instant(), secs in arb_stay_seconds()) {
        let booking = BookingService::reserve(
            booking_input(start, start + Duration::seconds(secs)),
            &sample_room(),
            "BKPROP".to_string(),
            StaffId::new(),
            start,
        )
        .unwrap();

        let pricing = booking.pricing;
        prop_assert_eq!(pricing.subtotal, pricing.room_rate * Decimal::from(pricing.total_nights));
        prop_assert_eq!(pricing.total_amount, pricing.subtotal + pricing.taxes - pricing.discounts);
    }

    /// Check-in succeeds exactly when the arrival time has been reached
    #[test]
    fn prop_check_in_gate(offset_minutes in -10_000i64..10_000) {
        let booking = sample_booking();
        let now = booking.check_in + Duration::minutes(offset_minutes);
        let result = BookingService::check_in(&booking, now, StaffId::new());
        prop_assert_eq!(result.is_ok(), offset_minutes >= 0);
    }

    /// The refund never exceeds what was paid and the fee never exceeds the total
    #[test]
    fn prop_cancellation_terms_bounded(
        paid_cents in 0i64..1_000_000,
        hours_before in -48i64..96,
        percent in 0u32..=200,
    ) {
        let mut booking = sample_booking();
        let paid = Decimal::new(paid_cents, 2);
        let received_at = booking.created_at;
        if paid > Decimal::ZERO {
            BookingService::record_payment(
                &mut booking,
                paid,
                PaymentMethod::Card,
                None,
                received_at,
            )
            .unwrap();
        }
        let policy = CancellationPolicy {
            free_cancellation_hours: 24,
            late_fee_percent: Decimal::from(percent),
        };
        let now = booking.check_in - Duration::hours(hours_before);
        let terms = BookingService::cancellation_terms(&booking, &policy, now, paid).unwrap();

        prop_assert!(terms.fee >= Decimal::ZERO);
        prop_assert!(terms.fee <= booking.pricing.total_amount);
        prop_assert!(terms.refund >= Decimal::ZERO);
        prop_assert!(terms.refund <= paid);
        if hours_before >= 24 {
            prop_assert_eq!(terms.fee, Decimal::ZERO);
        }
    }
}
