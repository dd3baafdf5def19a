//! FileRecordStore - in-memory table persisted to a single snapshot file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use super::in_memory::SnapshotEntry;
use super::{InMemoryRecordStore, Record, RecordStore, StoreError};

/// Record store that rewrites a `bitcode` snapshot of its table after every mutation.
///
/// The snapshot is written to a sibling temp file and renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact. A mutation whose snapshot
/// cannot be written is rolled back in memory before the error is returned.
#[derive(Clone)]
pub struct FileRecordStore {
    inner: InMemoryRecordStore,
    path: Arc<PathBuf>,
    writer: Arc<Mutex<()>>,
}

impl FileRecordStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let inner = match fs::read(&path) {
            Ok(bytes) => {
                let entries: Vec<SnapshotEntry> = bitcode::deserialize(&bytes)
                    .map_err(|e| StoreError::Encoding(e.to_string()))?;
                info!(path = %path.display(), records = entries.len(), "opened record store");
                InMemoryRecordStore::from_snapshot(entries)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "creating new record store");
                InMemoryRecordStore::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            inner,
            path: Arc::new(path),
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to the table and persist it. `changed` decides from the
    /// mutation's result whether there is anything to write.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&InMemoryRecordStore) -> Result<T, StoreError>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StoreError> {
        let _guard = self
            .writer
            .lock()
            .map_err(|_| StoreError::Storage("writer lock poisoned".into()))?;

        let before = self.inner.snapshot()?;
        let value = mutate(&self.inner)?;
        if !changed(&value) {
            return Ok(value);
        }

        if let Err(err) = self.flush() {
            warn!(path = %self.path.display(), error = %err, "snapshot write failed, rolling back");
            self.inner.restore(before)?;
            return Err(err);
        }

        Ok(value)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let entries = self.inner.snapshot()?;
        let bytes =
            bitcode::serialize(&entries).map_err(|e| StoreError::Encoding(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &*self.path)?;

        debug!(path = %self.path.display(), records = entries.len(), "flushed record store");
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        self.inner.get(key)
    }

    fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.commit(|inner| inner.insert(record), |_| true)
    }

    fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.commit(|inner| inner.put(record), |_| true)
    }

    fn delete<R: Record>(&self, key: &str) -> Result<bool, StoreError> {
        self.commit(|inner| inner.delete::<R>(key), |existed| *existed)
    }

    fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.inner.get_all()
    }
}
