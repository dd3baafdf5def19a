//! InMemoryRecordStore - HashMap-backed record store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::{Record, RecordStore, StoreError};

/// Internal stored representation of a record.
struct StoredRecord {
    bytes: Vec<u8>,
    seq: u64,
}

#[derive(Default)]
struct Table {
    records: HashMap<String, StoredRecord>,
    next_seq: u64,
}

/// One row of a persisted table, as written by [`super::FileRecordStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SnapshotEntry {
    pub key: String,
    pub seq: u64,
    pub bytes: Vec<u8>,
}

/// In-memory record store backed by a HashMap.
///
/// Storage key is `"COLLECTION:key"`. Records are held as JSON bytes, so every
/// read is a disconnected copy. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, key: &str) -> String {
        format!("{}:{}", collection, key)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        self.table
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    /// Rows of every collection, ordered by insertion.
    pub(crate) fn snapshot(&self) -> Result<Vec<SnapshotEntry>, StoreError> {
        let table = self.read()?;
        let mut entries: Vec<SnapshotEntry> = table
            .records
            .iter()
            .map(|(key, stored)| SnapshotEntry {
                key: key.clone(),
                seq: stored.seq,
                bytes: stored.bytes.clone(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.seq);
        Ok(entries)
    }

    /// Rebuild a store from persisted rows.
    pub(crate) fn from_snapshot(entries: Vec<SnapshotEntry>) -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::from_entries(entries))),
        }
    }

    /// Replace the whole table with previously captured rows.
    pub(crate) fn restore(&self, entries: Vec<SnapshotEntry>) -> Result<(), StoreError> {
        *self.write()? = Table::from_entries(entries);
        Ok(())
    }
}

impl Table {
    fn from_entries(entries: Vec<SnapshotEntry>) -> Self {
        let next_seq = entries.iter().map(|e| e.seq + 1).max().unwrap_or(0);
        let records = entries
            .into_iter()
            .map(|entry| {
                (
                    entry.key,
                    StoredRecord {
                        bytes: entry.bytes,
                        seq: entry.seq,
                    },
                )
            })
            .collect();

        Self { records, next_seq }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        let key = Self::make_key(R::COLLECTION, key);
        let table = self.read()?;

        match table.records.get(&key) {
            Some(stored) => Ok(Some(serde_json::from_slice(&stored.bytes)?)),
            None => Ok(None),
        }
    }

    fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let key = Self::make_key(R::COLLECTION, &record.key());
        let bytes = serde_json::to_vec(record)?;
        let mut table = self.write()?;

        if table.records.contains_key(&key) {
            return Err(StoreError::Conflict {
                collection: R::COLLECTION.to_string(),
                key: record.key(),
            });
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.records.insert(key, StoredRecord { bytes, seq });

        Ok(())
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let key = Self::make_key(R::COLLECTION, &record.key());
        let bytes = serde_json::to_vec(record)?;
        let mut table = self.write()?;

        if let Some(stored) = table.records.get_mut(&key) {
            stored.bytes = bytes;
            return Ok(());
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.records.insert(key, StoredRecord { bytes, seq });

        Ok(())
    }

    fn delete<R: Record>(&self, key: &str) -> Result<bool, StoreError> {
        let key = Self::make_key(R::COLLECTION, key);
        let mut table = self.write()?;

        Ok(table.records.remove(&key).is_some())
    }

    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let table = self.read()?;
        let prefix = format!("{}:", R::COLLECTION);

        let mut rows: Vec<&StoredRecord> = table
            .records
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, stored)| stored)
            .collect();
        rows.sort_by_key(|stored| stored.seq);

        rows.into_iter()
            .map(|stored| serde_json::from_slice(&stored.bytes).map_err(StoreError::from))
            .collect()
    }
}
