//! RecordStore - Abstract keyed storage for records.

use super::{Record, StoreError};

/// Abstract keyed storage for records.
///
/// Every read decodes a new value; callers never share state with the store.
pub trait RecordStore: Send + Sync {
    /// Get a record by key. Returns None if not found.
    fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Conflict`] if the key exists.
    fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError>;

    /// Upsert a record. An existing record keeps its position in `get_all`.
    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError>;

    /// Delete a record by key. Returns true if it existed.
    fn delete<R: Record>(&self, key: &str) -> Result<bool, StoreError>;

    /// All records of a collection, in insertion order.
    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError>;
}
