//! The entity store: in-memory state plus the persistence commit boundary.
//!
//! There is exactly one logical actor, so the store is not a concurrency
//! mechanism; the interior mutex only satisfies Rust's aliasing rules while
//! the services share one `Arc<Store>`. Every engine receives the store
//! explicitly at construction, never through a global, so tests get full
//! isolation from a fresh store per test.

use chrono::Utc;
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::errors::{DomainError, Result};
use crate::storage::{Snapshot, SnapshotStorage};

pub struct Store {
    storage: Box<dyn SnapshotStorage>,
    state: Mutex<Snapshot>,
}

impl Store {
    /// Open a store over the given storage backend, loading the persisted
    /// snapshot or starting from the default state on first run.
    pub fn open(storage: Box<dyn SnapshotStorage>) -> Result<Arc<Self>> {
        let snapshot = storage
            .load()
            .map_err(DomainError::Storage)?
            .unwrap_or_default();
        info!(
            "Opened store: {} members, {} prizes, {} ledger entries",
            snapshot.members.len(),
            snapshot.prizes.len(),
            snapshot.ledger.len()
        );
        Ok(Arc::new(Self { storage, state: Mutex::new(snapshot) }))
    }

    /// Read from the current state.
    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        let state = self.state.lock().unwrap();
        f(&state)
    }

    /// Apply a mutation and commit the resulting snapshot.
    ///
    /// The closure must validate before touching the state, so that an `Err`
    /// leaves the snapshot untouched. A failed commit surfaces as
    /// `DomainError::Storage`, but the mutation is kept: in-memory state
    /// stays authoritative for the rest of the session.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Snapshot) -> Result<R>) -> Result<R> {
        let mut state = self.state.lock().unwrap();
        let out = f(&mut state)?;
        state.meta.updated_at = Utc::now();
        self.storage.save(&state).map_err(DomainError::Storage)?;
        Ok(out)
    }

    /// Replace the whole state wholesale, preserving the incoming snapshot's
    /// metadata. Used by import, which must round-trip exactly.
    pub fn replace(&self, snapshot: Snapshot) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state = snapshot;
        self.storage.save(&state).map_err(DomainError::Storage)
    }
}
