//! Guest ledger.
//!
//! Statistics and loyalty only change when a stay completes. The tier is a
//! pure function of points and never drops on its own.

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use error::GuestError;
pub use ledger::GuestLedger;
pub use types::{
    CreateGuestInput, Guest, GuestPreferences, GuestStatistics, Loyalty, LoyaltyTier,
};
