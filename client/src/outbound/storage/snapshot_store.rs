//! Collection snapshots persisted as JSON arrays.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StateDir;
use super::atomic_io::{read_if_present, remove_if_present, write_atomic};
use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

/// Snapshot store for one collection of `E`.
///
/// A missing file means "not cached"; `[]` is a cached empty collection.
#[derive(Debug)]
pub struct FileSnapshotStore<E> {
    state: StateDir,
    file_name: String,
    _records: PhantomData<fn() -> E>,
}

impl<E> FileSnapshotStore<E> {
    /// Store backed by `file_name` inside `state`.
    pub fn new(state: StateDir, file_name: impl Into<String>) -> Self {
        Self {
            state,
            file_name: file_name.into(),
            _records: PhantomData,
        }
    }
}

impl<E> SnapshotStore<E> for FileSnapshotStore<E>
where
    E: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<Vec<E>>, SnapshotStoreError> {
        let Some(bytes) = read_if_present(self.state.dir(), &self.file_name)
            .map_err(|err| SnapshotStoreError::io(err.to_string()))?
        else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| SnapshotStoreError::corrupt(format!("{}: {err}", self.file_name)))
    }

    fn save(&self, snapshot: &[E]) -> Result<(), SnapshotStoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|err| SnapshotStoreError::io(err.to_string()))?;
        write_atomic(self.state.dir(), &self.file_name, &bytes)
            .map_err(|err| SnapshotStoreError::io(err.to_string()))
    }

    fn clear(&self) -> Result<(), SnapshotStoreError> {
        remove_if_present(self.state.dir(), &self.file_name)
            .map_err(|err| SnapshotStoreError::io(err.to_string()))
    }
}
