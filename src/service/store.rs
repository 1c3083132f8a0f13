//! Storage collaborator contract and an in-memory implementation.

use crate::core::{Dispenser, DispenserId, DispenserStatus};
use crate::lifecycle::DispenserPatch;
use crate::snapshot::{DispenserSnapshot, SnapshotError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors a store can report
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dispenser {id} not found")]
    NotFound { id: DispenserId },

    #[error("dispenser {id} already exists")]
    Duplicate { id: DispenserId },

    /// The record changed status between load and write.
    #[error("dispenser {id} is {found}, patch was decided against {expected}")]
    Conflict {
        id: DispenserId,
        expected: DispenserStatus,
        found: DispenserStatus,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What the service needs from persistence.
pub trait DispenserStore: Send + Sync {
    /// Persist a newly created dispenser.
    fn insert(&self, dispenser: Dispenser) -> Result<(), StoreError>;

    fn load_by_id(&self, id: &DispenserId) -> Result<Option<Dispenser>, StoreError>;

    /// Write a patch, returning the record as stored afterwards.
    ///
    /// Implementations without concurrency control apply it last-write-wins.
    fn apply_patch(&self, id: &DispenserId, patch: &DispenserPatch)
        -> Result<Dispenser, StoreError>;
}

/// Process-local store.
///
/// `apply_patch` is a compare-and-swap on the patch's `from` status, so
/// two racing toggles of the same dispenser cannot both land.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    records: Arc<RwLock<HashMap<DispenserId, Dispenser>>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot every record, ordered by creation time.
    pub fn snapshot_all(
        &self,
        taken_at: DateTime<Utc>,
    ) -> Result<Vec<DispenserSnapshot>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut snapshots: Vec<DispenserSnapshot> = records
            .values()
            .map(|d| DispenserSnapshot::capture(d, taken_at))
            .collect();
        snapshots.sort_by_key(|s| s.dispenser.created_at);
        Ok(snapshots)
    }

    /// Rebuild a store from snapshots. Any invalid snapshot fails the
    /// whole restore.
    pub fn restore(
        snapshots: impl IntoIterator<Item = DispenserSnapshot>,
    ) -> Result<Self, StoreError> {
        let mut records = HashMap::new();
        for snapshot in snapshots {
            let dispenser = snapshot.restore()?;
            if records.contains_key(&dispenser.id) {
                return Err(StoreError::Duplicate { id: dispenser.id });
            }
            records.insert(dispenser.id, dispenser);
        }
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }
}

impl DispenserStore for InMemoryStore {
    fn insert(&self, dispenser: Dispenser) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&dispenser.id) {
            return Err(StoreError::Duplicate { id: dispenser.id });
        }
        records.insert(dispenser.id, dispenser);
        Ok(())
    }

    fn load_by_id(&self, id: &DispenserId) -> Result<Option<Dispenser>, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.get(id).cloned())
    }

    fn apply_patch(
        &self,
        id: &DispenserId,
        patch: &DispenserPatch,
    ) -> Result<Dispenser, StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let current = records.get(id).ok_or(StoreError::NotFound { id: *id })?;

        if current.status != patch.from {
            return Err(StoreError::Conflict {
                id: *id,
                expected: patch.from,
                found: current.status,
            });
        }

        let next = patch.apply_to(current);
        records.insert(*id, next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Pricing;
    use crate::lifecycle::apply_transition;

    fn open_patch(dispenser: &Dispenser) -> DispenserPatch {
        apply_transition(dispenser, DispenserStatus::Open, Utc::now(), &Pricing::default())
            .unwrap()
    }

    #[test]
    fn insert_then_load() {
        let store = InMemoryStore::new();
        let dispenser = Dispenser::new(0.1, Utc::now());

        store.insert(dispenser.clone()).unwrap();

        assert_eq!(store.load_by_id(&dispenser.id).unwrap(), Some(dispenser));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn unknown_id_loads_nothing() {
        let store = InMemoryStore::new();
        assert!(store.load_by_id(&DispenserId::new()).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = InMemoryStore::new();
        let dispenser = Dispenser::new(0.1, Utc::now());

        store.insert(dispenser.clone()).unwrap();
        let err = store.insert(dispenser).unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn apply_patch_updates_record() {
        let store = InMemoryStore::new();
        let dispenser = Dispenser::new(0.1, Utc::now());
        store.insert(dispenser.clone()).unwrap();

        let patch = open_patch(&dispenser);
        let stored = store.apply_patch(&dispenser.id, &patch).unwrap();

        assert_eq!(stored.status, DispenserStatus::Open);
        assert_eq!(store.load_by_id(&dispenser.id).unwrap(), Some(stored));
    }

    #[test]
    fn stale_patch_is_a_conflict() {
        let store = InMemoryStore::new();
        let dispenser = Dispenser::new(0.1, Utc::now());
        store.insert(dispenser.clone()).unwrap();

        // Two callers decide against the same closed snapshot.
        let first = open_patch(&dispenser);
        let second = open_patch(&dispenser);

        store.apply_patch(&dispenser.id, &first).unwrap();
        let err = store.apply_patch(&dispenser.id, &second).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Conflict {
                expected: DispenserStatus::Closed,
                found: DispenserStatus::Open,
                ..
            }
        ));
    }

    #[test]
    fn patching_missing_record_is_not_found() {
        let store = InMemoryStore::new();
        let dispenser = Dispenser::new(0.1, Utc::now());

        let err = store
            .apply_patch(&dispenser.id, &open_patch(&dispenser))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn snapshots_restore_an_equal_store() {
        let store = InMemoryStore::new();
        let first = Dispenser::new(0.1, Utc::now());
        let second = Dispenser::new(0.2, Utc::now());
        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();
        store.apply_patch(&second.id, &open_patch(&second)).unwrap();

        let snapshots = store.snapshot_all(Utc::now()).unwrap();
        assert_eq!(snapshots.len(), 2);

        let restored = InMemoryStore::restore(snapshots).unwrap();
        assert_eq!(restored.load_by_id(&first.id).unwrap(), Some(first));
        assert_eq!(
            restored.load_by_id(&second.id).unwrap(),
            store.load_by_id(&second.id).unwrap()
        );
    }

    #[test]
    fn restore_rejects_inconsistent_snapshot() {
        let mut dispenser = Dispenser::new(0.1, Utc::now());
        dispenser.status = DispenserStatus::Open;

        let err = InMemoryStore::restore(vec![DispenserSnapshot::capture(&dispenser, Utc::now())])
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Snapshot(SnapshotError::ValidationFailed(_))
        ));
    }
}
