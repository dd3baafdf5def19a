//! Record stores - durable keyed storage for typed records.
//!
//! A store knows nothing about products. It keeps serialized records grouped by
//! collection, hands back freshly decoded copies on every read, and remembers the
//! order in which keys were first inserted so `get_all` is stable.
//!
//! ## Example
//!
//! ```ignore
//! use stockroom::store::{InMemoryRecordStore, Record, RecordStore};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Shelf {
//!     pub code: String,
//!     pub capacity: u32,
//! }
//!
//! impl Record for Shelf {
//!     const COLLECTION: &'static str = "shelves";
//!     fn key(&self) -> String { self.code.clone() }
//! }
//!
//! let store = InMemoryRecordStore::new();
//! store.insert(&shelf)?;
//! let loaded: Option<Shelf> = store.get("A1")?;
//! ```

mod backend;
#[cfg(feature = "file")]
mod file;
mod in_memory;
mod record_store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be kept in a [`RecordStore`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this record type (e.g., "products").
    const COLLECTION: &'static str;

    /// Returns the unique key of this record within its collection.
    fn key(&self) -> String;
}

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert over a key that already exists.
    #[error("record already exists: {collection}:{key}")]
    Conflict { collection: String, key: String },

    /// A record could not be encoded or decoded.
    #[error("record serialization error: {0}")]
    Serde(String),

    /// The on-disk snapshot could not be encoded or decoded.
    #[error("store encoding error: {0}")]
    Encoding(String),

    #[error("store i/o error")]
    Io(#[from] std::io::Error),

    /// Storage-level error, e.g. a poisoned lock.
    #[error("record storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use backend::StoreBackend;
#[cfg(feature = "file")]
pub use file::FileRecordStore;
pub use in_memory::InMemoryRecordStore;
pub use record_store::RecordStore;
