//! Invoice settlement engine.
//!
//! An invoice is the folio for one booking. Line items and payments are
//! appended through [`InvoiceService`]; totals, balance and status are always
//! derived from them and cannot be written directly.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::InvoiceError;
pub use service::InvoiceService;
pub use types::{
    Invoice, InvoicePayment, InvoiceStatus, InvoiceSummary, LineItem, LineItemCategory,
    NewInvoicePayment, NewLineItem, PaymentStatus,
};
