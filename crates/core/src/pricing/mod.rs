//! Money and tax arithmetic.
//!
//! Pure functions shared by rooms, bookings and invoices. Tax amounts are
//! rounded to the currency's minor unit with Banker's rounding, so every
//! aggregate built from them is an exact decimal sum.

pub mod calculator;
pub mod error;

#[cfg(test)]
mod calculator_props;

pub use calculator::{LineTotals, TaxCalculator};
pub use error::PricingError;
