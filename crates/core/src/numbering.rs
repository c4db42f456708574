//! Booking and invoice number formats.
//!
//! - Booking: `BK` + base-36 epoch millis + 4 random base-36 characters
//! - Invoice: `INV` + `YYYY` + `MM` + base-36 epoch millis
//!
//! All letters are upper case. Invoice numbers carry no random part, so two
//! invoices opened in the same millisecond collide; the store rejects the
//! second one.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BOOKING_SUFFIX_LEN: usize = 4;

/// Source of human-facing document numbers.
pub trait IdentifierGenerator: Send + Sync {
    /// Next booking number for a booking made at `now`.
    fn booking_number(&self, now: DateTime<Utc>) -> String;

    /// Next invoice number for an invoice opened at `now`.
    fn invoice_number(&self, now: DateTime<Utc>) -> String;
}

/// Default generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifiers;

impl IdentifierGenerator for RandomIdentifiers {
    fn booking_number(&self, now: DateTime<Utc>) -> String {
        booking_number(now, &mut rand::rng())
    }

    fn invoice_number(&self, now: DateTime<Utc>) -> String {
        invoice_number(now)
    }
}

/// Formats a booking number using `rng` for the suffix.
pub fn booking_number<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let mut number = format!("BK{}", to_base36(now.timestamp_millis()));
    for _ in 0..BOOKING_SUFFIX_LEN {
        number.push(char::from(BASE36[rng.random_range(0..BASE36.len())]));
    }
    number
}

/// Formats an invoice number.
#[must_use]
pub fn invoice_number(now: DateTime<Utc>) -> String {
    format!(
        "INV{:04}{:02}{}",
        now.year(),
        now.month(),
        to_base36(now.timestamp_millis())
    )
}

/// Upper-case base-36. Negative values (pre-1970) are rendered by magnitude.
fn to_base36(value: i64) -> String {
    let mut n = value.unsigned_abs();
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36, so the index is in range.
        let digit = usize::try_from(n % 36).unwrap_or_default();
        digits.push(BASE36[digit]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
