//! Property-based tests for InvoiceService.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::invoice::service::InvoiceService;
use crate::invoice::service::tests::{empty_invoice, payment};
use crate::invoice::types::{InvoiceStatus, LineItemCategory, NewLineItem};
use crate::room::service::tests::at;

fn arb_line_item() -> impl Strategy<Value = NewLineItem> {
    (1u32..10, 0i64..500_000, 0i64..=250).prop_map(|(quantity, cents, tenths)| NewLineItem {
        category: LineItemCategory::FoodBeverage,
        description: "Dinner".to_string(),
        quantity,
        unit_price: Decimal::new(cents, 2),
        tax_rate: Decimal::new(tenths, 1),
    })
}

fn arb_payments() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2)), 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Summary and balance always agree with the line items and payments
    #[test]
    fn prop_summary_is_derived(
        items in prop::collection::vec(arb_line_item(), 1..6),
        payments in arb_payments(),
    ) {
        let mut invoice = empty_invoice();
        for item in items {
            InvoiceService::add_line_item(&mut invoice, item, at(5, 15)).unwrap();
        }
        for amount in &payments {
            InvoiceService::add_payment(&mut invoice, payment(*amount), at(6, 9)).unwrap();
        }

        let subtotal: Decimal = invoice.line_items().iter().map(|i| i.subtotal).sum();
        let tax: Decimal = invoice.line_items().iter().map(|i| i.tax_amount).sum();
        let paid: Decimal = payments.iter().copied().sum();
        let summary = *invoice.summary();
        let position = *invoice.payment_status();

        prop_assert_eq!(summary.subtotal, subtotal);
        prop_assert_eq!(summary.total_tax, tax);
        prop_assert_eq!(summary.total_amount, subtotal + tax - summary.discounts);
        prop_assert_eq!(position.total_paid, paid);
        prop_assert_eq!(position.outstanding_balance, summary.total_amount - paid);
    }

    /// Status follows total paid against total amount
    #[test]
    fn prop_status_tracks_payments(
        item in arb_line_item(),
        payments in arb_payments(),
    ) {
        let mut invoice = empty_invoice();
        InvoiceService::add_line_item(&mut invoice, item, at(5, 15)).unwrap();
        for amount in &payments {
            InvoiceService::add_payment(&mut invoice, payment(*amount), at(6, 9)).unwrap();
        }

        let paid = invoice.payment_status().total_paid;
        let total = invoice.summary().total_amount;
        let expected = if paid.is_zero() {
            InvoiceStatus::Pending
        } else if paid < total {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Paid
        };
        prop_assert_eq!(invoice.status(), expected);
        prop_assert_eq!(InvoiceService::is_fully_paid(&invoice), paid >= total);
    }

    /// Recomputing without a mutation changes nothing
    #[test]
    fn prop_recompute_idempotent(
        items in prop::collection::vec(arb_line_item(), 0..4),
        payments in arb_payments(),
    ) {
        let mut invoice = empty_invoice();
        for item in items {
            InvoiceService::add_line_item(&mut invoice, item, at(5, 15)).unwrap();
        }
        for amount in &payments {
            InvoiceService::add_payment(&mut invoice, payment(*amount), at(6, 9)).unwrap();
        }
        InvoiceService::recompute_summary(&mut invoice);
        let once = invoice.clone();
        InvoiceService::recompute_summary(&mut invoice);
        prop_assert_eq!(invoice, once);
    }
}
