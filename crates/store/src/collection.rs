//! Typed JSON collections over a key-value backend.
//!
//! Each record type lives as one JSON array under its own storage key,
//! mirroring how the application persisted to browser local storage. A
//! collection reads the whole array, mutates it in memory, and writes it
//! back; fine for the single-session data sizes this system handles.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use clothesphere_core::Entity;

use crate::kv::{KeyValueStore, StoreError};

/// Storage key for the inventory catalog.
pub const INVENTORY_KEY: &str = "clothesphere.inventory";
/// Storage key for purchase orders.
pub const ORDERS_KEY: &str = "clothesphere.orders";
/// Storage key for outsourcing records.
pub const OUTSOURCING_KEY: &str = "clothesphere.outsourcing";

/// A typed collection of entities stored as one JSON array under `key`.
pub struct Collection<'a, T, S: ?Sized> {
    store: &'a S,
    key: &'static str,
    _marker: PhantomData<T>,
}

impl<'a, T, S> Collection<'a, T, S>
where
    T: Entity + Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    pub fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// All records under the key; an absent key is an empty collection.
    pub fn list(&self) -> Result<Vec<T>, StoreError> {
        match self.store.read(self.key)? {
            Some(raw) => {
                let records: Vec<T> = serde_json::from_str(&raw)?;
                debug!(key = self.key, count = records.len(), "collection read");
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    /// The record with the given id, if present.
    pub fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Insert or replace by id.
    pub fn upsert(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.save(&records)
    }

    /// Delete by id; deleting an absent id is a no-op.
    pub fn remove(&self, id: T::Id) -> Result<(), StoreError> {
        let mut records = self.list()?;
        records.retain(|r| r.id() != id);
        self.save(&records)
    }

    /// Replace the whole collection.
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        debug!(key = self.key, count = records.len(), "collection written");
        self.store.write(self.key, &raw)
    }
}
