//! Cache-first repository over a remote collection.
//!
//! Reads are served from the persisted snapshot whenever one exists; only a
//! cache miss contacts the remote source. Creates, updates, and deletes are
//! optimistic local writes: they change and persist the snapshot and are
//! never sent to the remote source. [`CachedRepository::refresh`] is the
//! explicit way to discard local writes and take the remote view again.
//!
//! Every write to the snapshot (population and the three mutations) happens
//! under one per-collection mutex, and the snapshot is persisted before the
//! in-memory copy changes, so a failed write leaves both unchanged.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::domain::ports::{
    CollectionSource, SnapshotStore, SnapshotStoreError, TokenProvider,
};
use crate::domain::{DomainError, Entity, EntityId};

/// Result of an update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The record existed and the snapshot was rewritten.
    Applied,
    /// No record carries the id; nothing changed.
    NotFound,
}

impl MutationOutcome {
    /// Whether the snapshot changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

enum SnapshotSlot<E> {
    Unloaded,
    Absent,
    Present(Vec<E>),
}

/// Cached repository for one collection of `E`.
pub struct CachedRepository<E: Entity> {
    collection: &'static str,
    store: Arc<dyn SnapshotStore<E>>,
    source: Arc<dyn CollectionSource<E>>,
    tokens: Arc<dyn TokenProvider>,
    slot: Mutex<SnapshotSlot<E>>,
}

impl<E: Entity> CachedRepository<E> {
    /// Repository named `collection` in logs.
    pub fn new(
        collection: &'static str,
        store: Arc<dyn SnapshotStore<E>>,
        source: Arc<dyn CollectionSource<E>>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            collection,
            store,
            source,
            tokens,
            slot: Mutex::new(SnapshotSlot::Unloaded),
        }
    }

    /// Return the collection, fetching it only when nothing is cached.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::SessionExpired`] on a cache miss with no
    ///   stored token. The remote source is not called.
    /// - [`crate::domain::ErrorCode::FetchFailure`] when the fetch fails or
    ///   returns duplicate ids. The snapshot stays absent.
    /// - [`crate::domain::ErrorCode::SessionEnded`] when the token changed
    ///   while the fetch was in flight. The result is discarded.
    /// - [`crate::domain::ErrorCode::StorageFailure`] when the snapshot could
    ///   not be read or written.
    pub async fn list(&self) -> Result<Vec<E>, DomainError> {
        {
            let mut slot = self.lock_slot()?;
            if let Some(items) = self.resolve_locked(&mut slot)? {
                debug!(collection = self.collection, count = items.len(), "cache hit");
                return Ok(items.clone());
            }
        }

        let fetched = self.fetch_verified().await?;

        let mut slot = self.lock_slot()?;
        if let SnapshotSlot::Present(items) = &*slot {
            debug!(
                collection = self.collection,
                "local snapshot populated during fetch; keeping it"
            );
            return Ok(items.clone());
        }
        self.commit_locked(&mut slot, fetched.clone())?;
        info!(
            collection = self.collection,
            count = fetched.len(),
            "snapshot populated"
        );
        Ok(fetched)
    }

    /// Local snapshot without contacting the remote source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::StorageFailure`] when the snapshot
    /// cannot be read.
    pub fn cached(&self) -> Result<Option<Vec<E>>, DomainError> {
        let mut slot = self.lock_slot()?;
        Ok(self.resolve_locked(&mut slot)?.cloned())
    }

    /// Append a new record with a fresh id.
    ///
    /// With nothing cached the collection starts empty; the remote list is
    /// not fetched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::StorageFailure`] when the snapshot
    /// cannot be read or written.
    pub fn create(&self, draft: E::Draft) -> Result<E, DomainError> {
        let mut slot = self.lock_slot()?;
        let mut next = self.resolve_locked(&mut slot)?.cloned().unwrap_or_default();
        let id = fresh_id(&next);
        let record = E::from_draft(id, draft);
        next.push(record.clone());
        self.commit_locked(&mut slot, next)?;
        info!(collection = self.collection, id = %record.id(), "record created locally");
        Ok(record)
    }

    /// Merge `patch` into the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::StorageFailure`] when the snapshot
    /// cannot be read or written.
    pub fn update(&self, id: &EntityId, patch: E::Patch) -> Result<MutationOutcome, DomainError> {
        let mut slot = self.lock_slot()?;
        let Some(items) = self.resolve_locked(&mut slot)? else {
            return Ok(self.not_found("update", id));
        };
        let mut next = items.clone();
        let Some(record) = next.iter_mut().find(|record| record.id() == id) else {
            return Ok(self.not_found("update", id));
        };
        record.apply_patch(patch);
        self.commit_locked(&mut slot, next)?;
        info!(collection = self.collection, id = %id, "record updated locally");
        Ok(MutationOutcome::Applied)
    }

    /// Remove the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::StorageFailure`] when the snapshot
    /// cannot be read or written.
    pub fn delete(&self, id: &EntityId) -> Result<MutationOutcome, DomainError> {
        let mut slot = self.lock_slot()?;
        let Some(items) = self.resolve_locked(&mut slot)? else {
            return Ok(self.not_found("delete", id));
        };
        let Some(position) = items.iter().position(|record| record.id() == id) else {
            return Ok(self.not_found("delete", id));
        };
        let mut next = items.clone();
        next.remove(position);
        self.commit_locked(&mut slot, next)?;
        info!(collection = self.collection, id = %id, "record deleted locally");
        Ok(MutationOutcome::Applied)
    }

    /// Fetch the collection again and replace the snapshot, local writes
    /// included.
    ///
    /// The current snapshot, persisted or not, is kept until the fetch has
    /// succeeded; every error leaves it as it was.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list`], except that a cached snapshot does not
    /// short-circuit the fetch.
    pub async fn refresh(&self) -> Result<Vec<E>, DomainError> {
        let fetched = self.fetch_verified().await?;
        let mut slot = self.lock_slot()?;
        self.commit_locked(&mut slot, fetched.clone())?;
        info!(
            collection = self.collection,
            count = fetched.len(),
            "snapshot replaced by refresh"
        );
        Ok(fetched)
    }

    /// Fetch with the current token and check the payload. The slot lock
    /// is not held.
    async fn fetch_verified(&self) -> Result<Vec<E>, DomainError> {
        let token = self.tokens.bearer_token().ok_or_else(|| {
            DomainError::session_expired("sign in to load the catalogue")
        })?;
        debug!(collection = self.collection, "fetching collection");

        let fetched = self.source.fetch_all(&token).await.map_err(|err| {
            warn!(collection = self.collection, error = %err, "collection fetch failed");
            DomainError::fetch_failure(format!("failed to fetch {}", self.collection))
        })?;
        ensure_unique_ids(&fetched).map_err(|id| {
            warn!(collection = self.collection, id = %id, "fetched collection repeats an id");
            DomainError::fetch_failure(format!("{} payload repeats id {id}", self.collection))
        })?;

        if self.tokens.bearer_token().as_ref() != Some(&token) {
            info!(
                collection = self.collection,
                "fetch discarded after the session changed"
            );
            return Err(DomainError::session_ended(
                "session ended while the catalogue was loading",
            ));
        }
        Ok(fetched)
    }

    /// Load the persisted snapshot on first use. A corrupt snapshot counts
    /// as absent.
    fn resolve_locked<'slot>(
        &self,
        slot: &'slot mut SnapshotSlot<E>,
    ) -> Result<Option<&'slot Vec<E>>, DomainError> {
        if matches!(slot, SnapshotSlot::Unloaded) {
            *slot = match self.store.load() {
                Ok(Some(items)) => SnapshotSlot::Present(items),
                Ok(None) => SnapshotSlot::Absent,
                Err(err @ SnapshotStoreError::Corrupt { .. }) => {
                    warn!(
                        collection = self.collection,
                        error = %err,
                        "persisted snapshot unreadable; treating as absent"
                    );
                    SnapshotSlot::Absent
                }
                Err(err) => return Err(self.storage_error(&err)),
            };
        }
        Ok(match slot {
            SnapshotSlot::Present(items) => Some(items),
            SnapshotSlot::Unloaded | SnapshotSlot::Absent => None,
        })
    }

    fn commit_locked(&self, slot: &mut SnapshotSlot<E>, next: Vec<E>) -> Result<(), DomainError> {
        self.store
            .save(&next)
            .map_err(|err| self.storage_error(&err))?;
        *slot = SnapshotSlot::Present(next);
        Ok(())
    }

    fn not_found(&self, operation: &'static str, id: &EntityId) -> MutationOutcome {
        debug!(collection = self.collection, operation, id = %id, "no record with id");
        MutationOutcome::NotFound
    }

    fn storage_error(&self, err: &SnapshotStoreError) -> DomainError {
        warn!(collection = self.collection, error = %err, "snapshot store failed");
        DomainError::storage_failure(format!("{} snapshot unavailable", self.collection))
    }

    fn lock_slot(&self) -> Result<MutexGuard<'_, SnapshotSlot<E>>, DomainError> {
        self.slot
            .lock()
            .map_err(|_| DomainError::internal("snapshot lock poisoned"))
    }
}

/// Return the first repeated id, if any.
fn ensure_unique_ids<E: Entity>(items: &[E]) -> Result<(), EntityId> {
    let mut seen = HashSet::with_capacity(items.len());
    match items.iter().find(|record| !seen.insert(record.id())) {
        Some(record) => Err(record.id().clone()),
        None => Ok(()),
    }
}

fn fresh_id<E: Entity>(items: &[E]) -> EntityId {
    loop {
        let candidate = EntityId::random();
        if items.iter().all(|record| record.id() != &candidate) {
            return candidate;
        }
    }
}
