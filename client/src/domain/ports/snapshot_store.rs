//! Driven port for the persisted collection snapshot.
//!
//! Absence of a stored snapshot means "not cached", which is distinct from a
//! stored empty collection.

use std::sync::RwLock;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by snapshot store adapters.
    pub enum SnapshotStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } => "snapshot store io failed: {message}",
        /// The stored snapshot could not be decoded.
        Corrupt { message: String } => "snapshot store record corrupt: {message}",
    }
}

/// Durable slot holding one serialised collection snapshot.
pub trait SnapshotStore<E>: Send + Sync {
    /// Read the snapshot, `None` when nothing is cached.
    fn load(&self) -> Result<Option<Vec<E>>, SnapshotStoreError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &[E]) -> Result<(), SnapshotStoreError>;

    /// Drop the stored snapshot so the next read counts as a miss.
    fn clear(&self) -> Result<(), SnapshotStoreError>;
}

/// Process-local snapshot store.
#[derive(Debug)]
pub struct InMemorySnapshotStore<E> {
    snapshot: RwLock<Option<Vec<E>>>,
}

impl<E> InMemorySnapshotStore<E> {
    /// Empty store: the first read is a miss.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }

    /// Store that already holds `snapshot`.
    #[must_use]
    pub const fn with_snapshot(snapshot: Vec<E>) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }
}

impl<E> Default for InMemorySnapshotStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send + Sync> SnapshotStore<E> for InMemorySnapshotStore<E> {
    fn load(&self) -> Result<Option<Vec<E>>, SnapshotStoreError> {
        self.snapshot
            .read()
            .map(|snapshot| snapshot.clone())
            .map_err(|_| SnapshotStoreError::io("snapshot lock poisoned"))
    }

    fn save(&self, snapshot: &[E]) -> Result<(), SnapshotStoreError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| SnapshotStoreError::io("snapshot lock poisoned"))?;
        *guard = Some(snapshot.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), SnapshotStoreError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| SnapshotStoreError::io("snapshot lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_collection_is_distinct_from_absent() {
        let store: InMemorySnapshotStore<u32> = InMemorySnapshotStore::new();
        assert_eq!(store.load().expect("load"), None);

        store.save(&[]).expect("save");
        assert_eq!(store.load().expect("load"), Some(Vec::new()));

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }
}
