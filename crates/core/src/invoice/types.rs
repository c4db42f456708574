//! Invoice (folio) types.
//!
//! Summary, payment status and invoice status are derived from line items,
//! payments and the discount. Their fields are crate-private so only
//! [`crate::invoice::InvoiceService`] can write them.

use chrono::{DateTime, Utc};
use innkeep_shared::types::{
    BookingId, Currency, GuestId, InvoiceId, LineItemId, Money, PaymentId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::booking::PaymentMethod;

/// Settlement status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Opened, nothing posted yet.
    Draft,
    /// Charges posted, nothing paid.
    Pending,
    /// Some but not all of the total has been paid.
    PartiallyPaid,
    /// Fully settled.
    Paid,
    /// Past its due date and not settled.
    Overdue,
    /// Voided. Terminal.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "partially_paid" => Some(Self::PartiallyPaid),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a line item charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemCategory {
    /// Room nights.
    Room,
    /// Restaurant and bar.
    FoodBeverage,
    /// In-room minibar.
    Minibar,
    /// Laundry service.
    Laundry,
    /// Spa treatments.
    Spa,
    /// Parking.
    Parking,
    /// Airport or local transport.
    Transport,
    /// Anything else.
    Other,
}

/// A charge to post to an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    /// What is being charged.
    pub category: LineItemCategory,
    /// Free-text description shown on the folio.
    pub description: String,
    /// Units charged; at least 1.
    pub quantity: u32,
    /// Price per unit before tax.
    pub unit_price: Decimal,
    /// Tax percentage.
    pub tax_rate: Decimal,
}

/// A posted charge with its computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identifier.
    pub id: LineItemId,
    /// What was charged.
    pub category: LineItemCategory,
    /// Description.
    pub description: String,
    /// Units charged.
    pub quantity: u32,
    /// Price per unit before tax.
    pub unit_price: Decimal,
    /// Tax percentage.
    pub tax_rate: Decimal,
    /// `quantity * unit_price`.
    pub subtotal: Decimal,
    /// Tax on the subtotal, rounded to the currency.
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount`.
    pub total: Decimal,
    /// When the charge was posted.
    pub posted_at: DateTime<Utc>,
}

/// A payment to record against an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoicePayment {
    /// Amount received; must be positive.
    pub amount: Decimal,
    /// Tender.
    pub method: PaymentMethod,
    /// Processor or receipt reference.
    pub reference: Option<String>,
    /// When the money was received. Defaults to the time of recording.
    pub received_at: Option<DateTime<Utc>>,
}

/// A recorded invoice payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePayment {
    /// Payment identifier.
    pub id: PaymentId,
    /// Amount received.
    pub amount: Decimal,
    /// Tender.
    pub method: PaymentMethod,
    /// Processor or receipt reference.
    pub reference: Option<String>,
    /// When the money was received.
    pub received_at: DateTime<Utc>,
}

/// Derived totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Sum of line item subtotals.
    pub subtotal: Decimal,
    /// Sum of line item taxes.
    pub total_tax: Decimal,
    /// Flat discount off the invoice.
    pub discounts: Decimal,
    /// `subtotal + total_tax - discounts`.
    pub total_amount: Decimal,
}

/// Derived payment position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// Sum of payments.
    pub total_paid: Decimal,
    /// `total_amount - total_paid`; negative when overpaid.
    pub outstanding_balance: Decimal,
    /// Receipt time of the most recent payment.
    pub last_payment_date: Option<DateTime<Utc>>,
}

/// The running bill for one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Internal identifier.
    pub id: InvoiceId,
    /// Human-facing invoice number (`INV…`), unique.
    pub invoice_number: String,
    /// The booking this folio belongs to. One invoice per booking.
    pub booking_id: BookingId,
    /// Guest being billed.
    pub guest_id: GuestId,
    /// Billing currency.
    pub currency: Currency,
    /// When the invoice was opened.
    pub issued_at: DateTime<Utc>,
    /// Payment deadline.
    pub due_date: DateTime<Utc>,
    pub(crate) line_items: Vec<LineItem>,
    pub(crate) payments: Vec<InvoicePayment>,
    pub(crate) summary: InvoiceSummary,
    pub(crate) payment_status: PaymentStatus,
    pub(crate) status: InvoiceStatus,
}

impl Invoice {
    /// Posted charges, in posting order.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Recorded payments, in recording order.
    #[must_use]
    pub fn payments(&self) -> &[InvoicePayment] {
        &self.payments
    }

    /// Derived totals.
    #[must_use]
    pub fn summary(&self) -> &InvoiceSummary {
        &self.summary
    }

    /// Derived payment position.
    #[must_use]
    pub fn payment_status(&self) -> &PaymentStatus {
        &self.payment_status
    }

    /// What the guest still owes, in the invoice currency. Negative when overpaid.
    #[must_use]
    pub const fn outstanding(&self) -> Money {
        Money::new(self.payment_status.outstanding_balance, self.currency)
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }
}
