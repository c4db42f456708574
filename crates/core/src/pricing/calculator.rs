//! Line-item and room-rate tax calculation.

use innkeep_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Computed amounts for one billable charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Quantity times unit price.
    pub subtotal: Decimal,
    /// Tax on the subtotal, rounded to the currency's minor unit.
    pub tax_amount: Decimal,
    /// Subtotal plus tax.
    pub total: Decimal,
}

/// Stateless tax calculator.
pub struct TaxCalculator;

impl TaxCalculator {
    /// Computes subtotal, tax and total for `quantity` units at `unit_price`.
    ///
    /// `tax_rate_percent` is a percentage (12 means 12%).
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidAmount` if quantity is zero or the price
    /// or tax rate is negative.
    pub fn line_item_totals(
        quantity: u32,
        unit_price: Decimal,
        tax_rate_percent: Decimal,
        currency: Currency,
    ) -> Result<LineTotals, PricingError> {
        if quantity == 0 {
            return Err(PricingError::InvalidAmount {
                field: "quantity",
                value: Decimal::from(quantity),
            });
        }
        Self::ensure_non_negative("unit_price", unit_price)?;
        Self::ensure_non_negative("tax_rate", tax_rate_percent)?;

        let subtotal = currency.round(Decimal::from(quantity) * unit_price);
        let tax_amount = Self::tax_on(subtotal, tax_rate_percent, currency);

        Ok(LineTotals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        })
    }

    /// Quotes a room's all-in nightly rate: base rate plus tax.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidAmount` if the base rate or tax rate is negative.
    pub fn room_total_rate(
        base_rate: Decimal,
        tax_rate_percent: Decimal,
        currency: Currency,
    ) -> Result<Decimal, PricingError> {
        Self::ensure_non_negative("base_rate", base_rate)?;
        Self::ensure_non_negative("tax_rate", tax_rate_percent)?;

        let base = currency.round(base_rate);
        Ok(base + Self::tax_on(base, tax_rate_percent, currency))
    }

    /// Tax on `amount` at `rate_percent`, rounded to the currency's minor unit.
    #[must_use]
    pub fn tax_on(amount: Decimal, rate_percent: Decimal, currency: Currency) -> Decimal {
        currency.round(amount * rate_percent / Decimal::ONE_HUNDRED)
    }

    /// Rejects negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidAmount` naming `field` if `value < 0`.
    pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), PricingError> {
        if value < Decimal::ZERO {
            return Err(PricingError::InvalidAmount { field, value });
        }
        Ok(())
    }

    /// Rejects zero and negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidAmount` naming `field` if `value <= 0`.
    pub fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), PricingError> {
        if value <= Decimal::ZERO {
            return Err(PricingError::InvalidAmount { field, value });
        }
        Ok(())
    }
}
