//! Property-based tests for the tax calculator.

use innkeep_shared::types::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::TaxCalculator;

/// Prices with two decimal places, 0.00 to 100,000.00.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Tax rates with one decimal place, 0.0% to 50.0%.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=500).prop_map(|tenths| Decimal::new(tenths, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// total = subtotal + tax, and subtotal = quantity * unit price
    #[test]
    fn prop_line_totals_add_up(
        quantity in 1u32..50,
        unit_price in arb_price(),
        rate in arb_rate(),
    ) {
        let totals =
            TaxCalculator::line_item_totals(quantity, unit_price, rate, Currency::Usd).unwrap();
        prop_assert_eq!(totals.subtotal, Decimal::from(quantity) * unit_price);
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
    }

    /// Tax never has more precision than the currency allows and is never negative.
    #[test]
    fn prop_tax_is_rounded_and_non_negative(
        quantity in 1u32..50,
        unit_price in arb_price(),
        rate in arb_rate(),
    ) {
        let totals =
            TaxCalculator::line_item_totals(quantity, unit_price, rate, Currency::Usd).unwrap();
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
        prop_assert_eq!(totals.tax_amount, totals.tax_amount.round_dp(2));
    }

    /// Rounded tax is within half a cent of the exact tax.
    #[test]
    fn prop_tax_within_half_minor_unit(
        unit_price in arb_price(),
        rate in arb_rate(),
    ) {
        let totals = TaxCalculator::line_item_totals(1, unit_price, rate, Currency::Usd).unwrap();
        let exact = unit_price * rate / Decimal::ONE_HUNDRED;
        prop_assert!((totals.tax_amount - exact).abs() <= Decimal::new(5, 3));
    }

    /// A room's all-in rate equals the one-night line item total.
    #[test]
    fn prop_room_rate_matches_single_night(
        base_rate in arb_price(),
        rate in arb_rate(),
    ) {
        let quoted = TaxCalculator::room_total_rate(base_rate, rate, Currency::Usd).unwrap();
        let line = TaxCalculator::line_item_totals(1, base_rate, rate, Currency::Usd).unwrap();
        prop_assert_eq!(quoted, line.total);
    }
}
