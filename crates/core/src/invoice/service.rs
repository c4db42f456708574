//! Invoice settlement.
//!
//! Every mutation ends in [`InvoiceService::recompute_summary`], which derives
//! the summary, payment position and status from line items, payments and
//! the discount through the pure [`InvoiceService::summarize`].

use chrono::{DateTime, Duration, Utc};
use innkeep_shared::types::{BookingId, Currency, GuestId, InvoiceId, LineItemId, PaymentId};
use rust_decimal::Decimal;

use crate::booking::{Booking, BookingPayment};
use crate::invoice::error::InvoiceError;
use crate::invoice::types::{
    Invoice, InvoicePayment, InvoiceStatus, InvoiceSummary, LineItem, LineItemCategory,
    NewInvoicePayment, NewLineItem, PaymentStatus,
};
use crate::pricing::{PricingError, TaxCalculator};

/// Stateless service for invoice operations.
pub struct InvoiceService;

impl InvoiceService {
    /// Opens an empty `draft` invoice.
    #[must_use]
    pub fn open(
        booking_id: BookingId,
        guest_id: GuestId,
        currency: Currency,
        invoice_number: String,
        now: DateTime<Utc>,
        due_days: u32,
    ) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            invoice_number,
            booking_id,
            guest_id,
            currency,
            issued_at: now,
            due_date: now + Duration::days(i64::from(due_days)),
            line_items: Vec::new(),
            payments: Vec::new(),
            summary: InvoiceSummary::default(),
            payment_status: PaymentStatus::default(),
            status: InvoiceStatus::Draft,
        }
    }

    /// Opens the folio for a booking with the room nights already posted.
    ///
    /// The booking's discount carries over, so a fresh folio totals the same
    /// as the booking quote. Deposits already taken on the booking are posted
    /// too, so a prepaid stay opens `paid`.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::Pricing` if the booking's stored pricing is invalid.
    pub fn open_for_booking(
        booking: &Booking,
        invoice_number: String,
        now: DateTime<Utc>,
        due_days: u32,
    ) -> Result<Invoice, InvoiceError> {
        let pricing = &booking.pricing;
        let mut invoice = Self::open(
            booking.id,
            booking.guest_id,
            pricing.currency,
            invoice_number,
            now,
            due_days,
        );

        Self::add_line_item(
            &mut invoice,
            NewLineItem {
                category: LineItemCategory::Room,
                description: format!("Room charge, {} night(s)", pricing.total_nights),
                quantity: pricing.total_nights,
                unit_price: pricing.room_rate,
                tax_rate: pricing.tax_rate,
            },
            now,
        )?;
        if pricing.discounts > Decimal::ZERO {
            Self::apply_discount(&mut invoice, pricing.discounts)?;
        }
        Self::post_booking_payments(&mut invoice, booking)?;
        Ok(invoice)
    }

    /// Booking payments not yet on the folio. Posted payments keep their id.
    pub fn unposted_booking_payments<'a>(
        invoice: &'a Invoice,
        booking: &'a Booking,
    ) -> impl Iterator<Item = &'a BookingPayment> + 'a {
        booking
            .payments
            .iter()
            .filter(|p| invoice.payments.iter().all(|posted| posted.id != p.id))
    }

    /// Copies every unposted booking payment onto the folio.
    ///
    /// Returns how many were posted. Running it again posts nothing.
    ///
    /// # Errors
    ///
    /// `InvoiceError::InvoiceCancelled` if the invoice is cancelled
    pub fn post_booking_payments(
        invoice: &mut Invoice,
        booking: &Booking,
    ) -> Result<usize, InvoiceError> {
        Self::ensure_open(invoice)?;
        let unposted: Vec<InvoicePayment> = Self::unposted_booking_payments(invoice, booking)
            .map(|p| InvoicePayment {
                id: p.id,
                amount: p.amount,
                method: p.method,
                reference: p.reference.clone(),
                received_at: p.received_at,
            })
            .collect();
        if unposted.is_empty() {
            return Ok(0);
        }

        let posted = unposted.len();
        invoice.payments.extend(unposted);
        Self::recompute_summary(invoice);
        Ok(posted)
    }

    /// Posts a charge.
    ///
    /// # Errors
    ///
    /// * `InvoiceError::InvoiceCancelled` if the invoice is cancelled
    /// * `InvoiceError::Pricing` for a zero quantity or negative price or rate
    pub fn add_line_item(
        invoice: &mut Invoice,
        item: NewLineItem,
        now: DateTime<Utc>,
    ) -> Result<LineItemId, InvoiceError> {
        Self::ensure_open(invoice)?;
        let totals = TaxCalculator::line_item_totals(
            item.quantity,
            item.unit_price,
            item.tax_rate,
            invoice.currency,
        )?;

        let id = LineItemId::new();
        invoice.line_items.push(LineItem {
            id,
            category: item.category,
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            tax_rate: item.tax_rate,
            subtotal: totals.subtotal,
            tax_amount: totals.tax_amount,
            total: totals.total,
            posted_at: now,
        });
        Self::recompute_summary(invoice);
        Ok(id)
    }

    /// Records a payment. Overpayment is allowed and shows as a negative balance.
    ///
    /// # Errors
    ///
    /// * `InvoiceError::InvoiceCancelled` if the invoice is cancelled
    /// * `InvoiceError::Pricing` if the amount is not positive
    pub fn add_payment(
        invoice: &mut Invoice,
        payment: NewInvoicePayment,
        now: DateTime<Utc>,
    ) -> Result<PaymentId, InvoiceError> {
        Self::ensure_open(invoice)?;
        TaxCalculator::ensure_positive("amount", payment.amount)?;

        let id = PaymentId::new();
        invoice.payments.push(InvoicePayment {
            id,
            amount: payment.amount,
            method: payment.method,
            reference: payment.reference,
            received_at: payment.received_at.unwrap_or(now),
        });
        Self::recompute_summary(invoice);
        Ok(id)
    }

    /// Sets the flat discount, replacing any previous one.
    ///
    /// # Errors
    ///
    /// * `InvoiceError::InvoiceCancelled` if the invoice is cancelled
    /// * `InvoiceError::Pricing` if the discount is negative or larger than
    ///   the charges it applies to
    pub fn apply_discount(invoice: &mut Invoice, amount: Decimal) -> Result<(), InvoiceError> {
        Self::ensure_open(invoice)?;
        TaxCalculator::ensure_non_negative("discount", amount)?;
        let gross = invoice.summary.subtotal + invoice.summary.total_tax;
        if amount > gross {
            return Err(PricingError::InvalidAmount {
                field: "discount",
                value: amount,
            }
            .into());
        }

        invoice.summary.discounts = amount;
        Self::recompute_summary(invoice);
        Ok(())
    }

    /// Derives summary, payment position and status from the inputs.
    ///
    /// `total_paid = 0` is `pending`, anything short of the total is
    /// `partially_paid`, and reaching the total is `paid`.
    #[must_use]
    pub fn summarize(
        line_items: &[LineItem],
        payments: &[InvoicePayment],
        discounts: Decimal,
    ) -> (InvoiceSummary, PaymentStatus, InvoiceStatus) {
        let subtotal: Decimal = line_items.iter().map(|item| item.subtotal).sum();
        let total_tax: Decimal = line_items.iter().map(|item| item.tax_amount).sum();
        let total_amount = subtotal + total_tax - discounts;
        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();

        let status = if total_paid.is_zero() {
            InvoiceStatus::Pending
        } else if total_paid < total_amount {
            InvoiceStatus::PartiallyPaid
        } else {
            InvoiceStatus::Paid
        };

        (
            InvoiceSummary {
                subtotal,
                total_tax,
                discounts,
                total_amount,
            },
            PaymentStatus {
                total_paid,
                outstanding_balance: total_amount - total_paid,
                last_payment_date: payments.last().map(|p| p.received_at),
            },
            status,
        )
    }

    /// Re-derives every computed field. Idempotent.
    ///
    /// A cancelled invoice keeps its status.
    pub fn recompute_summary(invoice: &mut Invoice) {
        let (summary, payment_status, status) =
            Self::summarize(&invoice.line_items, &invoice.payments, invoice.summary.discounts);
        invoice.summary = summary;
        invoice.payment_status = payment_status;
        if invoice.status != InvoiceStatus::Cancelled {
            invoice.status = status;
        }
    }

    /// Past the due date and not paid.
    #[must_use]
    pub fn is_overdue(invoice: &Invoice, now: DateTime<Utc>) -> bool {
        now > invoice.due_date && invoice.status != InvoiceStatus::Paid
    }

    /// Nothing left to pay.
    #[must_use]
    pub fn is_fully_paid(invoice: &Invoice) -> bool {
        invoice.payment_status.outstanding_balance <= Decimal::ZERO
    }

    /// Marks the invoice `overdue` if [`Self::is_overdue`].
    ///
    /// Returns whether the invoice is now flagged. Cancelled invoices are
    /// never flagged.
    pub fn flag_overdue(invoice: &mut Invoice, now: DateTime<Utc>) -> bool {
        if invoice.status == InvoiceStatus::Cancelled || !Self::is_overdue(invoice, now) {
            return false;
        }
        invoice.status = InvoiceStatus::Overdue;
        true
    }

    /// Voids the invoice. Cancelled is terminal.
    ///
    /// Payments stay on the voided invoice as the record of what was
    /// received; settling them is up to the caller.
    ///
    /// # Errors
    ///
    /// `InvoiceError::InvoiceCancelled` if already cancelled
    pub fn cancel(invoice: &mut Invoice) -> Result<(), InvoiceError> {
        Self::ensure_open(invoice)?;
        invoice.status = InvoiceStatus::Cancelled;
        Ok(())
    }

    fn ensure_open(invoice: &Invoice) -> Result<(), InvoiceError> {
        if invoice.status == InvoiceStatus::Cancelled {
            return Err(InvoiceError::InvoiceCancelled {
                invoice_number: invoice.invoice_number.clone(),
            });
        }
        Ok(())
    }
}
