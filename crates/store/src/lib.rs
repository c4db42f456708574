//! Persistence for Innkeep documents.
//!
//! Rooms, bookings, invoices and guests are stored whole, each with a version
//! number. Every save names the version it was read at and fails with
//! [`StoreError::Conflict`] if another writer got there first, so two
//! interleaved read-modify-writes of the same invoice cannot lose an update.
//!
//! # Modules
//!
//! - `document` - The [`Document`] contract and [`Versioned`] wrapper
//! - `repository` - Async [`Repository`] and [`Store`] traits
//! - `memory` - `DashMap`-backed implementation

pub mod document;
pub mod error;
pub mod memory;
pub mod repository;

#[cfg(test)]
mod memory_tests;

pub use document::{
    BOOKING_NUMBER, Document, GUEST_EMAIL, INVOICE_BOOKING, INVOICE_NUMBER, ROOM_NUMBER, Versioned,
};
pub use error::{StoreError, StoreResult};
pub use memory::{MemoryRepository, MemoryStore};
pub use repository::{Repository, Store};
