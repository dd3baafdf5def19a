//! StoreBackend - runtime choice between store implementations.

#[cfg(feature = "file")]
use super::FileRecordStore;
use super::{InMemoryRecordStore, Record, RecordStore, StoreError};

/// A record store picked at startup from configuration.
#[derive(Clone)]
pub enum StoreBackend {
    InMemory(InMemoryRecordStore),
    #[cfg(feature = "file")]
    File(FileRecordStore),
}

macro_rules! delegate {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            StoreBackend::InMemory($store) => $call,
            #[cfg(feature = "file")]
            StoreBackend::File($store) => $call,
        }
    };
}

impl RecordStore for StoreBackend {
    fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        delegate!(self, store => store.get(key))
    }

    fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        delegate!(self, store => store.insert(record))
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        delegate!(self, store => store.put(record))
    }

    fn delete<R: Record>(&self, key: &str) -> Result<bool, StoreError> {
        delegate!(self, store => store.delete::<R>(key))
    }

    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        delegate!(self, store => store.get_all())
    }
}

impl From<InMemoryRecordStore> for StoreBackend {
    fn from(store: InMemoryRecordStore) -> Self {
        StoreBackend::InMemory(store)
    }
}

#[cfg(feature = "file")]
impl From<FileRecordStore> for StoreBackend {
    fn from(store: FileRecordStore) -> Self {
        StoreBackend::File(store)
    }
}
