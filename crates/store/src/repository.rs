//! Repository contracts.

use async_trait::async_trait;
use innkeep_core::booking::Booking;
use innkeep_core::guest::Guest;
use innkeep_core::invoice::Invoice;
use innkeep_core::room::Room;

use crate::document::{Document, Versioned};
use crate::error::StoreResult;

/// Versioned persistence for one document kind.
///
/// Writes are read-modify-write: callers `get` a document, change it, and
/// `save` it back with the version they read. A save against a stale version
/// fails with `StoreError::Conflict` and writes nothing.
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Stores a new document at version 1.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the id or a unique key is taken.
    async fn insert(&self, value: T) -> StoreResult<Versioned<T>>;

    /// Loads a document by identity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no such document.
    async fn get(&self, id: T::Id) -> StoreResult<Versioned<T>>;

    /// Loads the document holding a unique key, if any.
    async fn find_unique(&self, key: &'static str, value: &str)
    -> StoreResult<Option<Versioned<T>>>;

    /// Replaces a document if it is still at `expected_version`.
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` if the document was never inserted
    /// * `StoreError::Conflict` if someone else saved first
    /// * `StoreError::Duplicate` if a changed unique key is taken
    async fn save(&self, value: T, expected_version: u64) -> StoreResult<Versioned<T>>;

    /// All documents, oldest first.
    async fn list(&self) -> StoreResult<Vec<Versioned<T>>>;
}

/// The four repositories the front desk works against.
pub trait Store: Send + Sync {
    /// Room repository.
    type Rooms: Repository<Room>;
    /// Booking repository.
    type Bookings: Repository<Booking>;
    /// Invoice repository.
    type Invoices: Repository<Invoice>;
    /// Guest repository.
    type Guests: Repository<Guest>;

    /// Rooms.
    fn rooms(&self) -> &Self::Rooms;
    /// Bookings.
    fn bookings(&self) -> &Self::Bookings;
    /// Invoices.
    fn invoices(&self) -> &Self::Invoices;
    /// Guests.
    fn guests(&self) -> &Self::Guests;
}
