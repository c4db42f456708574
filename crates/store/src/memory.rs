//! In-memory document store.
//!
//! Intended for tests, demos and the seeder. Each repository keeps documents
//! in a `DashMap` keyed by id plus a second map from unique key to id.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use innkeep_core::booking::Booking;
use innkeep_core::guest::Guest;
use innkeep_core::invoice::Invoice;
use innkeep_core::room::Room;
use tracing::{debug, warn};

use crate::document::{Document, Versioned};
use crate::error::{StoreError, StoreResult};
use crate::repository::{Repository, Store};

type IndexKey = (&'static str, String);

/// In-memory repository with optimistic versioning and unique keys.
#[derive(Debug)]
pub struct MemoryRepository<T: Document> {
    records: DashMap<T::Id, Versioned<T>>,
    index: DashMap<IndexKey, T::Id>,
}

impl<T: Document> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
            index: DashMap::new(),
        }
    }
}

impl<T: Document> MemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Points every key at `id`. On failure, keys claimed by this call are
    /// released again and the index is left as it was.
    fn claim_keys(&self, id: T::Id, keys: &[IndexKey]) -> StoreResult<()> {
        let mut claimed: Vec<IndexKey> = Vec::new();
        for &(field, ref value) in keys {
            match self.index.entry((field, value.clone())) {
                Entry::Occupied(owner) if *owner.get() != id => {
                    drop(owner);
                    self.release_keys(id, &claimed);
                    warn!(kind = T::KIND, field, value = %value, "Unique key already taken");
                    return Err(StoreError::Duplicate {
                        kind: T::KIND,
                        field,
                        value: value.clone(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(id);
                    claimed.push((field, value.clone()));
                }
            }
        }
        Ok(())
    }

    fn release_keys(&self, id: T::Id, keys: &[IndexKey]) {
        for key in keys {
            self.index.remove_if(key, |_, owner| *owner == id);
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn insert(&self, value: T) -> StoreResult<Versioned<T>> {
        let id = value.id();
        let Entry::Vacant(slot) = self.records.entry(id) else {
            return Err(StoreError::Duplicate {
                kind: T::KIND,
                field: "id",
                value: id.to_string(),
            });
        };

        self.claim_keys(id, &value.unique_keys())?;
        let stored = Versioned { version: 1, value };
        slot.insert(stored.clone());
        debug!(kind = T::KIND, id = %id, "Document inserted");
        Ok(stored)
    }

    async fn get(&self, id: T::Id) -> StoreResult<Versioned<T>> {
        self.records
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })
    }

    async fn find_unique(
        &self,
        key: &'static str,
        value: &str,
    ) -> StoreResult<Option<Versioned<T>>> {
        let Some(id) = self
            .index
            .get(&(key, value.to_string()))
            .map(|entry| *entry.value())
        else {
            return Ok(None);
        };
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, value: T, expected_version: u64) -> StoreResult<Versioned<T>> {
        let id = value.id();
        let Some(mut slot) = self.records.get_mut(&id) else {
            return Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        };

        if slot.version != expected_version {
            warn!(
                kind = T::KIND,
                id = %id,
                expected = expected_version,
                actual = slot.version,
                "Version conflict"
            );
            return Err(StoreError::Conflict {
                kind: T::KIND,
                id: id.to_string(),
                expected: expected_version,
                actual: slot.version,
            });
        }

        let old_keys = slot.value.unique_keys();
        let new_keys = value.unique_keys();
        if old_keys != new_keys {
            self.claim_keys(id, &new_keys)?;
            let stale: Vec<IndexKey> = old_keys
                .into_iter()
                .filter(|key| !new_keys.contains(key))
                .collect();
            self.release_keys(id, &stale);
        }

        slot.version += 1;
        slot.value = value;
        debug!(kind = T::KIND, id = %id, version = slot.version, "Document saved");
        Ok((*slot).clone())
    }

    async fn list(&self) -> StoreResult<Vec<Versioned<T>>> {
        let mut all: Vec<Versioned<T>> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|doc| doc.value.id());
        Ok(all)
    }
}

/// All four repositories in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: MemoryRepository<Room>,
    bookings: MemoryRepository<Booking>,
    invoices: MemoryRepository<Invoice>,
    guests: MemoryRepository<Guest>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Rooms = MemoryRepository<Room>;
    type Bookings = MemoryRepository<Booking>;
    type Invoices = MemoryRepository<Invoice>;
    type Guests = MemoryRepository<Guest>;

    fn rooms(&self) -> &Self::Rooms {
        &self.rooms
    }

    fn bookings(&self) -> &Self::Bookings {
        &self.bookings
    }

    fn invoices(&self) -> &Self::Invoices {
        &self.invoices
    }

    fn guests(&self) -> &Self::Guests {
        &self.guests
    }
}
