//! `clothesphere-store` — persistence seam: an opaque key-value backend
//! (browser local storage, a remote table, or memory) and typed JSON
//! collections layered on top of it.

pub mod collection;
pub mod kv;

pub use collection::{Collection, INVENTORY_KEY, ORDERS_KEY, OUTSOURCING_KEY};
pub use kv::{KeyValueStore, MemoryStore, StoreError};
