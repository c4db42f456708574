//! Booking lifecycle transitions.
//!
//! Transition functions only validate and describe; [`BookingService::apply`]
//! writes the result onto the booking. Nothing here touches rooms, invoices
//! or guests directly.

use chrono::{DateTime, Duration, Utc};
use innkeep_shared::config::CancellationConfig;
use innkeep_shared::types::{BookingId, PaymentId, StaffId};
use rust_decimal::Decimal;

use crate::booking::error::BookingError;
use crate::booking::types::{
    Booking, BookingAction, BookingPayment, BookingPricing, BookingStatus, BookingStatusRecord,
    Cancellation, CancellationTerms, CreateBookingInput, PaymentMethod,
};
use crate::pricing::{PricingError, TaxCalculator};
use crate::room::{Room, RoomService};

/// Cancellation fee rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    /// Cancelling at least this many hours before check-in is free.
    pub free_cancellation_hours: u32,
    /// Late fee as a percentage of one night's all-in rate.
    pub late_fee_percent: Decimal,
}

impl From<&CancellationConfig> for CancellationPolicy {
    fn from(config: &CancellationConfig) -> Self {
        Self {
            free_cancellation_hours: config.free_cancellation_hours,
            late_fee_percent: config.late_fee_percent,
        }
    }
}

/// Stateless service for booking lifecycle transitions.
pub struct BookingService;

impl BookingService {
    /// Reserve `room` for a guest.
    ///
    /// The room must pass [`RoomService::is_available`]. No check is made for
    /// other bookings overlapping the same dates.
    ///
    /// # Errors
    ///
    /// * `BookingError::Room` if the room is inactive or not available
    /// * `BookingError::InvalidOccupancy` / `ExceedsCapacity` for bad head counts
    /// * `BookingError::InvalidDateRange` if check-out is not after check-in
    /// * `BookingError::Pricing` for a negative or oversized discount
    pub fn reserve(
        input: CreateBookingInput,
        room: &Room,
        booking_number: String,
        created_by: StaffId,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        RoomService::ensure_available(room)?;

        if input.occupancy.adults < 1 {
            return Err(BookingError::InvalidOccupancy);
        }
        if input.occupancy.total() > u16::from(room.capacity) {
            return Err(BookingError::ExceedsCapacity {
                guests: input.occupancy.total(),
                capacity: room.capacity,
            });
        }

        let total_nights = Self::calculate_total_nights(input.check_in, input.check_out)?;
        let stay = TaxCalculator::line_item_totals(
            total_nights,
            room.rate.base_rate,
            room.rate.tax_rate,
            room.rate.currency,
        )?;

        TaxCalculator::ensure_non_negative("discount", input.discount)?;
        if input.discount > stay.total {
            return Err(PricingError::InvalidAmount {
                field: "discount",
                value: input.discount,
            }
            .into());
        }

        Ok(Booking {
            id: BookingId::new(),
            booking_number,
            guest_id: input.guest_id,
            room_id: room.id,
            check_in: input.check_in,
            check_out: input.check_out,
            actual_check_in: None,
            actual_check_out: None,
            occupancy: input.occupancy,
            pricing: BookingPricing {
                room_rate: room.rate.base_rate,
                tax_rate: room.rate.tax_rate,
                total_nights,
                subtotal: stay.subtotal,
                taxes: stay.tax_amount,
                discounts: input.discount,
                total_amount: stay.total - input.discount,
                currency: room.rate.currency,
            },
            source: input.source,
            status: BookingStatusRecord {
                current: BookingStatus::Confirmed,
                last_updated: now,
                updated_by: created_by,
            },
            payments: Vec::new(),
            cancellation: Cancellation::default(),
            special_requests: input.special_requests,
            created_at: now,
            created_by,
        })
    }

    /// True iff the booking is confirmed and its check-in time has arrived.
    ///
    /// There is no upper bound: a late arrival can always check in.
    #[must_use]
    pub fn can_check_in(booking: &Booking, now: DateTime<Utc>) -> bool {
        booking.status.current == BookingStatus::Confirmed && now >= booking.check_in
    }

    /// Check the guest in.
    ///
    /// The returned action asks for the room to become `occupied`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidTransition` unless [`Self::can_check_in`].
    pub fn check_in(
        booking: &Booking,
        now: DateTime<Utc>,
        actor: StaffId,
    ) -> Result<BookingAction, BookingError> {
        if !Self::can_check_in(booking, now) {
            return Err(BookingError::InvalidTransition {
                from: booking.status.current,
                to: BookingStatus::CheckedIn,
            });
        }

        Ok(BookingAction::CheckIn {
            new_status: BookingStatus::CheckedIn,
            room_id: booking.room_id,
            checked_in_by: actor,
            checked_in_at: now,
        })
    }

    /// True iff the guest is checked in.
    #[must_use]
    pub fn can_check_out(booking: &Booking) -> bool {
        booking.status.current == BookingStatus::CheckedIn
    }

    /// Check the guest out.
    ///
    /// The returned action asks for the room to go `dirty` and carries the
    /// night count the guest ledger needs.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidTransition` unless [`Self::can_check_out`].
    pub fn check_out(
        booking: &Booking,
        now: DateTime<Utc>,
        actor: StaffId,
    ) -> Result<BookingAction, BookingError> {
        if !Self::can_check_out(booking) {
            return Err(BookingError::InvalidTransition {
                from: booking.status.current,
                to: BookingStatus::CheckedOut,
            });
        }
        let total_nights = Self::calculate_total_nights(booking.check_in, booking.check_out)?;

        Ok(BookingAction::CheckOut {
            new_status: BookingStatus::CheckedOut,
            room_id: booking.room_id,
            guest_id: booking.guest_id,
            total_nights,
            checked_out_by: actor,
            checked_out_at: now,
        })
    }

    /// True iff the booking is confirmed and not already cancelled.
    #[must_use]
    pub fn can_cancel(booking: &Booking) -> bool {
        booking.status.current == BookingStatus::Confirmed && !booking.cancellation.is_cancelled
    }

    /// Cancel the booking.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidTransition` unless [`Self::can_cancel`]
    /// * `BookingError::Pricing` if the refund or fee is negative
    pub fn cancel(
        booking: &Booking,
        now: DateTime<Utc>,
        actor: StaffId,
        reason: String,
        refund_amount: Decimal,
        cancellation_fee: Decimal,
    ) -> Result<BookingAction, BookingError> {
        if !Self::can_cancel(booking) {
            return Err(BookingError::InvalidTransition {
                from: booking.status.current,
                to: BookingStatus::Cancelled,
            });
        }
        TaxCalculator::ensure_non_negative("refund_amount", refund_amount)?;
        TaxCalculator::ensure_non_negative("cancellation_fee", cancellation_fee)?;

        Ok(BookingAction::Cancel {
            new_status: BookingStatus::Cancelled,
            cancelled_by: actor,
            cancelled_at: now,
            reason,
            refund_amount,
            cancellation_fee,
        })
    }

    /// Fee and refund for cancelling at `now` under `policy`.
    ///
    /// Free when `now` is at least `free_cancellation_hours` before check-in;
    /// otherwise `late_fee_percent` of one night's all-in rate, never more than
    /// the booking total. The refund is whatever of `amount_paid` exceeds the
    /// fee; pass everything received for the stay, folio payments included.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Pricing` if the booking's stored rates are
    /// negative or `amount_paid` is.
    pub fn cancellation_terms(
        booking: &Booking,
        policy: &CancellationPolicy,
        now: DateTime<Utc>,
        amount_paid: Decimal,
    ) -> Result<CancellationTerms, BookingError> {
        TaxCalculator::ensure_non_negative("amount_paid", amount_paid)?;
        let free_until =
            booking.check_in - Duration::hours(i64::from(policy.free_cancellation_hours));

        let fee = if now <= free_until {
            Decimal::ZERO
        } else {
            let pricing = &booking.pricing;
            let nightly = TaxCalculator::room_total_rate(
                pricing.room_rate,
                pricing.tax_rate,
                pricing.currency,
            )?;
            let fee = pricing
                .currency
                .round(nightly * policy.late_fee_percent / Decimal::ONE_HUNDRED);
            fee.min(pricing.total_amount).max(Decimal::ZERO)
        };

        let refund = (amount_paid - fee).max(Decimal::ZERO);
        Ok(CancellationTerms { fee, refund })
    }

    /// Nights between two instants: `ceil((check_out - check_in) / 1 day)`.
    ///
    /// A partial day counts as a full night.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidDateRange` if `check_out <= check_in`.
    pub fn calculate_total_nights(
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<u32, BookingError> {
        let invalid = || BookingError::InvalidDateRange {
            check_in,
            check_out,
        };
        if check_out <= check_in {
            return Err(invalid());
        }

        let span = check_out - check_in;
        let whole_days = span.num_days();
        let remainder = span - Duration::days(whole_days);
        let nights = if remainder > Duration::zero() {
            whole_days + 1
        } else {
            whole_days
        };

        u32::try_from(nights).map_err(|_| invalid())
    }

    /// Sum of payments taken against the booking.
    #[must_use]
    pub fn total_paid(booking: &Booking) -> Decimal {
        booking.payments.iter().map(|p| p.amount).sum()
    }

    /// Total amount minus payments. Negative when the guest has overpaid.
    #[must_use]
    pub fn outstanding_balance(booking: &Booking) -> Decimal {
        booking.pricing.total_amount - Self::total_paid(booking)
    }

    /// Record a deposit or prepayment. Overpayment is allowed.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Pricing` if `amount` is not positive.
    pub fn record_payment(
        booking: &mut Booking,
        amount: Decimal,
        method: PaymentMethod,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<PaymentId, BookingError> {
        TaxCalculator::ensure_positive("amount", amount)?;

        let id = PaymentId::new();
        booking.payments.push(BookingPayment {
            id,
            amount,
            method,
            reference,
            received_at: now,
        });
        Ok(id)
    }

    /// Write a validated action onto the booking.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidTransition` if the booking has moved on
    /// since the action was produced.
    pub fn apply(booking: &mut Booking, action: &BookingAction) -> Result<(), BookingError> {
        let to = action.new_status();
        if !Self::is_valid_transition(booking.status.current, to) {
            return Err(BookingError::InvalidTransition {
                from: booking.status.current,
                to,
            });
        }

        match action {
            BookingAction::CheckIn {
                checked_in_by,
                checked_in_at,
                ..
            } => {
                booking.actual_check_in = Some(*checked_in_at);
                Self::set_status(booking, to, *checked_in_by, *checked_in_at);
            }
            BookingAction::CheckOut {
                checked_out_by,
                checked_out_at,
                ..
            } => {
                booking.actual_check_out = Some(*checked_out_at);
                Self::set_status(booking, to, *checked_out_by, *checked_out_at);
            }
            BookingAction::Cancel {
                cancelled_by,
                cancelled_at,
                reason,
                refund_amount,
                cancellation_fee,
                ..
            } => {
                booking.cancellation = Cancellation {
                    is_cancelled: true,
                    cancelled_at: Some(*cancelled_at),
                    cancelled_by: Some(*cancelled_by),
                    reason: Some(reason.clone()),
                    refund_amount: *refund_amount,
                    cancellation_fee: *cancellation_fee,
                };
                Self::set_status(booking, to, *cancelled_by, *cancelled_at);
            }
        }
        Ok(())
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Confirmed → CheckedIn
    /// - CheckedIn → CheckedOut
    /// - Confirmed → Cancelled
    /// - Confirmed → NoShow
    #[must_use]
    pub fn is_valid_transition(from: BookingStatus, to: BookingStatus) -> bool {
        matches!(
            (from, to),
            (
                BookingStatus::Confirmed,
                BookingStatus::CheckedIn | BookingStatus::Cancelled | BookingStatus::NoShow
            ) | (BookingStatus::CheckedIn, BookingStatus::CheckedOut)
        )
    }

    fn set_status(
        booking: &mut Booking,
        status: BookingStatus,
        actor: StaffId,
        at: DateTime<Utc>,
    ) {
        booking.status = BookingStatusRecord {
            current: status,
            last_updated: at,
            updated_by: actor,
        };
    }
}
