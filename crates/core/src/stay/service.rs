//! Check-in, check-out and cancellation across booking, room, invoice and guest.
//!
//! Each step is validated up front; nothing is written until every
//! precondition holds, so a failure leaves all four documents untouched.

use chrono::{DateTime, Utc};
use innkeep_shared::types::StaffId;
use rust_decimal::Decimal;

use crate::booking::{
    Booking, BookingAction, BookingService, CancellationPolicy, CancellationTerms,
};
use crate::guest::{Guest, GuestLedger, LoyaltyTier};
use crate::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus};
use crate::room::{Room, RoomService};
use crate::stay::error::StayError;

/// What a completed checkout produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Nights credited to the guest.
    pub total_nights: u32,
    /// Revenue realised on the folio.
    pub revenue: Decimal,
    /// Loyalty points awarded.
    pub points_awarded: u64,
    /// Guest tier after the award.
    pub tier: LoyaltyTier,
}

/// Stateless orchestration of a guest's stay.
pub struct StayService;

impl StayService {
    /// Booking → `checked_in`, room → `occupied`.
    ///
    /// # Errors
    ///
    /// * `StayError::Mismatch` if the room is not the booked room
    /// * `StayError::Booking` if the booking cannot check in at `now`
    pub fn check_in(
        booking: &mut Booking,
        room: &mut Room,
        now: DateTime<Utc>,
        actor: StaffId,
    ) -> Result<BookingAction, StayError> {
        if room.id != booking.room_id {
            return Err(Self::mismatch("room", booking));
        }
        let action = BookingService::check_in(booking, now, actor)?;

        BookingService::apply(booking, &action)?;
        if let Some((_, status)) = action.room_status_request() {
            RoomService::set_status(room, status, actor, now);
        }
        Ok(action)
    }

    /// Booking → `checked_out`, room → `dirty`, folio settled figures folded
    /// into the guest's statistics and loyalty.
    ///
    /// Booking deposits not yet on the folio are posted first, so revenue is
    /// everything actually paid for the stay. Points are earned at
    /// `points_per_unit` per whole currency unit of that revenue.
    ///
    /// The folio summary is re-derived unconditionally, which also clears an
    /// `overdue` flag: the folio leaves as `pending`, `partially_paid` or
    /// `paid` according to its payments.
    ///
    /// # Errors
    ///
    /// * `StayError::Mismatch` if room, invoice or guest belong elsewhere
    /// * `StayError::Booking` if the booking is not checked in
    /// * `StayError::Invoice` if the folio has been cancelled
    pub fn check_out(
        booking: &mut Booking,
        room: &mut Room,
        invoice: &mut Invoice,
        guest: &mut Guest,
        now: DateTime<Utc>,
        actor: StaffId,
        points_per_unit: u64,
    ) -> Result<CheckoutSummary, StayError> {
        if room.id != booking.room_id {
            return Err(Self::mismatch("room", booking));
        }
        if invoice.booking_id != booking.id {
            return Err(Self::mismatch("invoice", booking));
        }
        if guest.id != booking.guest_id {
            return Err(Self::mismatch("guest", booking));
        }
        if invoice.status() == InvoiceStatus::Cancelled {
            return Err(InvoiceError::InvoiceCancelled {
                invoice_number: invoice.invoice_number.clone(),
            }
            .into());
        }

        let action = BookingService::check_out(booking, now, actor)?;
        let total_nights = action.completed_nights().unwrap_or_default();
        let revenue = Self::amount_received(booking, invoice);
        let points_awarded = GuestLedger::points_for_revenue(revenue, points_per_unit);

        BookingService::apply(booking, &action)?;
        if let Some((_, status)) = action.room_status_request() {
            RoomService::set_status(room, status, actor, now);
        }
        InvoiceService::post_booking_payments(invoice, booking)?;
        InvoiceService::recompute_summary(invoice);
        GuestLedger::record_completed_stay(guest, revenue, total_nights, now)?;
        GuestLedger::add_loyalty_points(guest, points_awarded);

        Ok(CheckoutSummary {
            total_nights,
            revenue,
            points_awarded,
            tier: guest.loyalty.tier,
        })
    }

    /// Booking → `cancelled` with the fee and refund set by `policy`, and the
    /// folio voided.
    ///
    /// The refund is computed from everything received for the stay: folio
    /// payments plus booking deposits not yet posted to it. Unposted deposits
    /// are copied onto a live folio before it is voided, so the voided folio
    /// lists every payment the refund and fee settle.
    ///
    /// # Errors
    ///
    /// * `StayError::Mismatch` if the folio belongs to another booking
    /// * `StayError::Booking` if the booking cannot be cancelled
    pub fn cancel(
        booking: &mut Booking,
        folio: Option<&mut Invoice>,
        policy: &CancellationPolicy,
        now: DateTime<Utc>,
        actor: StaffId,
        reason: String,
    ) -> Result<CancellationTerms, StayError> {
        if folio.as_ref().is_some_and(|f| f.booking_id != booking.id) {
            return Err(Self::mismatch("invoice", booking));
        }

        let received = match folio.as_deref() {
            Some(folio) => Self::amount_received(booking, folio),
            None => BookingService::total_paid(booking),
        };
        let terms = BookingService::cancellation_terms(booking, policy, now, received)?;
        let action = BookingService::cancel(booking, now, actor, reason, terms.refund, terms.fee)?;

        BookingService::apply(booking, &action)?;
        if let Some(folio) = folio.filter(|f| f.status() != InvoiceStatus::Cancelled) {
            InvoiceService::post_booking_payments(folio, booking)?;
            InvoiceService::cancel(folio)?;
        }
        Ok(terms)
    }

    /// Folio payments plus booking deposits not yet posted to the folio.
    fn amount_received(booking: &Booking, invoice: &Invoice) -> Decimal {
        let unposted: Decimal = InvoiceService::unposted_booking_payments(invoice, booking)
            .map(|p| p.amount)
            .sum();
        invoice.payment_status().total_paid + unposted
    }

    fn mismatch(entity: &'static str, booking: &Booking) -> StayError {
        StayError::Mismatch {
            entity,
            booking_number: booking.booking_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::service::tests::sample_booking;
    use crate::booking::{BookingError, BookingStatus, PaymentMethod};
    use crate::guest::ledger::tests::sample_guest;
    use crate::invoice::service::tests::payment;
    use crate::room::service::tests::{at, sample_room};
    use crate::room::RoomStatus;
    use innkeep_shared::config::CancellationConfig;
    use rust_decimal_macros::dec;

    struct Stay {
        booking: Booking,
        room: Room,
        invoice: Invoice,
        guest: Guest,
    }

    fn stay() -> Stay {
        let room = sample_room();
        let guest = sample_guest();
        let mut booking = sample_booking();
        booking.room_id = room.id;
        booking.guest_id = guest.id;
        let invoice =
            InvoiceService::open_for_booking(&booking, "INV1".to_string(), at(5, 15), 7).unwrap();
        Stay {
            booking,
            room,
            invoice,
            guest,
        }
    }

    #[test]
    fn test_full_stay() {
        let mut s = stay();
        let staff = StaffId::new();

        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        assert_eq!(s.booking.status.current, BookingStatus::CheckedIn);
        assert_eq!(s.room.status.current, RoomStatus::Occupied);

        InvoiceService::add_payment(&mut s.invoice, payment(dec!(2240)), at(7, 9)).unwrap();
        let summary = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(7, 10),
            staff,
            1,
        )
        .unwrap();

        assert_eq!(s.booking.status.current, BookingStatus::CheckedOut);
        assert_eq!(s.room.status.current, RoomStatus::Dirty);
        assert_eq!(s.room.status.updated_by, Some(staff));
        assert_eq!(summary.total_nights, 2);
        assert_eq!(summary.revenue, dec!(2240));
        assert_eq!(summary.points_awarded, 2240);
        assert_eq!(summary.tier, LoyaltyTier::Silver);
        assert_eq!(s.guest.statistics.total_bookings, 1);
        assert_eq!(s.guest.statistics.total_revenue, dec!(2240));
        assert_eq!(s.guest.statistics.average_stay_duration, dec!(2));
        assert_eq!(s.guest.statistics.last_stay_date, Some(at(7, 10)));
    }

    #[test]
    fn test_revenue_is_what_was_paid() {
        let mut s = stay();
        let staff = StaffId::new();
        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        InvoiceService::add_payment(&mut s.invoice, payment(dec!(1000.75)), at(7, 9)).unwrap();

        let summary = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(7, 10),
            staff,
            2,
        )
        .unwrap();
        assert_eq!(summary.revenue, dec!(1000.75));
        assert_eq!(summary.points_awarded, 2000);
        assert_eq!(s.guest.statistics.total_revenue, dec!(1000.75));
    }

    #[test]
    fn test_early_check_in_touches_nothing() {
        let mut s = stay();
        let err = StayService::check_in(&mut s.booking, &mut s.room, at(4, 0), StaffId::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StayError::Booking(BookingError::InvalidTransition { .. })
        ));
        assert_eq!(s.booking.status.current, BookingStatus::Confirmed);
        assert_eq!(s.room.status.current, RoomStatus::Available);
    }

    #[test]
    fn test_check_in_wrong_room() {
        let mut s = stay();
        let mut other = sample_room();
        let err = StayService::check_in(&mut s.booking, &mut other, at(5, 15), StaffId::new())
            .unwrap_err();
        assert_eq!(err.error_code(), "MISMATCHED_DOCUMENTS");
        assert_eq!(other.status.current, RoomStatus::Available);
    }

    #[test]
    fn test_check_out_before_check_in_touches_nothing() {
        let mut s = stay();
        let before_guest = s.guest.clone();
        let err = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(7, 10),
            StaffId::new(),
            1,
        )
        .unwrap_err();

        assert!(matches!(err, StayError::Booking(_)));
        assert_eq!(s.booking.status.current, BookingStatus::Confirmed);
        assert_eq!(s.room.status.current, RoomStatus::Available);
        assert_eq!(s.guest, before_guest);
    }

    #[test]
    fn test_check_out_with_cancelled_invoice_fails() {
        let mut s = stay();
        let staff = StaffId::new();
        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        InvoiceService::cancel(&mut s.invoice).unwrap();

        let err = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(7, 10),
            staff,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, StayError::Invoice(_)));
        assert_eq!(s.booking.status.current, BookingStatus::CheckedIn);
        assert_eq!(s.room.status.current, RoomStatus::Occupied);
    }

    #[test]
    fn test_check_out_foreign_guest() {
        let mut s = stay();
        let staff = StaffId::new();
        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        let mut stranger = sample_guest();

        let err = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut stranger,
            at(7, 10),
            staff,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, StayError::Mismatch { entity: "guest", .. }));
        assert_eq!(stranger.statistics.total_bookings, 0);
    }

    #[test]
    fn test_check_out_counts_booking_deposits() {
        let mut s = stay();
        let staff = StaffId::new();
        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        BookingService::record_payment(
            &mut s.booking,
            dec!(2240),
            PaymentMethod::Card,
            None,
            at(6, 9),
        )
        .unwrap();

        let summary = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(7, 10),
            staff,
            1,
        )
        .unwrap();
        assert_eq!(summary.revenue, dec!(2240));
        assert_eq!(summary.points_awarded, 2240);
        assert_eq!(s.invoice.payments().len(), 1);
        assert_eq!(s.invoice.payments()[0].id, s.booking.payments[0].id);
        assert_eq!(s.invoice.status(), InvoiceStatus::Paid);
    }

    #[test]
    fn test_check_out_rederives_overdue_folio() {
        let mut s = stay();
        let staff = StaffId::new();
        StayService::check_in(&mut s.booking, &mut s.room, at(5, 15), staff).unwrap();
        InvoiceService::add_payment(&mut s.invoice, payment(dec!(1000)), at(6, 9)).unwrap();
        assert!(InvoiceService::flag_overdue(&mut s.invoice, at(13, 0)));

        let summary = StayService::check_out(
            &mut s.booking,
            &mut s.room,
            &mut s.invoice,
            &mut s.guest,
            at(13, 1),
            staff,
            1,
        )
        .unwrap();
        assert_eq!(summary.total_nights, 2);
        assert_eq!(s.invoice.status(), InvoiceStatus::PartiallyPaid);
        assert_eq!(s.invoice.payment_status().outstanding_balance, dec!(1240));
    }

    #[test]
    fn test_free_cancellation_refunds_folio_payments() {
        let mut s = stay();
        InvoiceService::add_payment(&mut s.invoice, payment(dec!(1000)), at(1, 9)).unwrap();
        let policy = CancellationPolicy::from(&CancellationConfig::default());

        let terms = StayService::cancel(
            &mut s.booking,
            Some(&mut s.invoice),
            &policy,
            at(2, 9),
            StaffId::new(),
            "Change of plans".to_string(),
        )
        .unwrap();
        assert_eq!(terms.fee, dec!(0));
        assert_eq!(terms.refund, dec!(1000));
        assert_eq!(s.booking.status.current, BookingStatus::Cancelled);
        assert_eq!(s.booking.cancellation.refund_amount, dec!(1000));
        assert_eq!(s.invoice.status(), InvoiceStatus::Cancelled);
        assert_eq!(s.invoice.payment_status().total_paid, dec!(1000));
    }

    #[test]
    fn test_late_cancellation_posts_deposits_before_voiding() {
        let mut s = stay();
        BookingService::record_payment(
            &mut s.booking,
            dec!(1500),
            PaymentMethod::Card,
            None,
            at(2, 9),
        )
        .unwrap();
        InvoiceService::add_payment(&mut s.invoice, payment(dec!(200)), at(3, 9)).unwrap();
        let policy = CancellationPolicy::from(&CancellationConfig::default());

        let terms = StayService::cancel(
            &mut s.booking,
            Some(&mut s.invoice),
            &policy,
            at(5, 9),
            StaffId::new(),
            "Flight cancelled".to_string(),
        )
        .unwrap();
        assert_eq!(terms.fee, dec!(1120));
        assert_eq!(terms.refund, dec!(580));
        assert_eq!(s.invoice.status(), InvoiceStatus::Cancelled);
        assert_eq!(s.invoice.payments().len(), 2);
        assert_eq!(s.invoice.payment_status().total_paid, dec!(1700));
    }

    #[test]
    fn test_cancel_without_folio_refunds_deposits() {
        let mut s = stay();
        BookingService::record_payment(
            &mut s.booking,
            dec!(500),
            PaymentMethod::Cash,
            None,
            at(1, 9),
        )
        .unwrap();
        let policy = CancellationPolicy::from(&CancellationConfig::default());

        let terms = StayService::cancel(
            &mut s.booking,
            None,
            &policy,
            at(1, 10),
            StaffId::new(),
            "Duplicate".to_string(),
        )
        .unwrap();
        assert_eq!(terms.refund, dec!(500));
        assert_eq!(s.booking.status.current, BookingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_with_foreign_folio_touches_nothing() {
        let mut s = stay();
        let mut other = sample_booking();
        other.room_id = s.room.id;
        let mut foreign =
            InvoiceService::open_for_booking(&other, "INV2".to_string(), at(1, 9), 7).unwrap();
        let policy = CancellationPolicy::from(&CancellationConfig::default());

        let err = StayService::cancel(
            &mut s.booking,
            Some(&mut foreign),
            &policy,
            at(1, 10),
            StaffId::new(),
            "Wrong folio".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, StayError::Mismatch { entity: "invoice", .. }));
        assert_eq!(s.booking.status.current, BookingStatus::Confirmed);
        assert_eq!(foreign.status(), InvoiceStatus::Pending);
    }
}
