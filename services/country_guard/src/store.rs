//! Retry State Storage
//!
//! In-memory [`RetryStateStore`] for single-process hosts and tests, and the
//! [`RetryStateSlot`] view the validator uses to talk to any store. The slot
//! is where store faults stop: a failed read is treated as "no state" and a
//! failed write or delete is logged and dropped, so a flaky store degrades
//! the guard to "first attempt" behaviour instead of failing the request.

use crate::traits::RetryStateStore;
use dashmap::DashMap;
use guard_types::{RetryState, RetryStateKey, StoreError};
use tracing::warn;

/// Concurrent in-memory retry state store
#[derive(Debug, Default)]
pub struct InMemoryRetryStore {
    entries: DashMap<RetryStateKey, RetryState>,
}

impl InMemoryRetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actors with a live streak
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RetryStateStore for InMemoryRetryStore {
    fn get(&self, key: &RetryStateKey) -> Result<Option<RetryState>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &RetryStateKey, state: RetryState) -> Result<(), StoreError> {
        self.entries.insert(key.clone(), state);
        Ok(())
    }

    fn delete(&self, key: &RetryStateKey) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Best-effort access to the retry state of one actor
pub struct RetryStateSlot<'a> {
    store: &'a dyn RetryStateStore,
    key: &'a RetryStateKey,
}

impl<'a> RetryStateSlot<'a> {
    pub fn new(store: &'a dyn RetryStateStore, key: &'a RetryStateKey) -> Self {
        Self { store, key }
    }

    /// Current state; store faults read as absent
    pub fn load(&self) -> Option<RetryState> {
        match self.store.get(self.key) {
            Ok(state) => state,
            Err(e) => {
                warn!("Treating retry state for {} as absent: {}", self.key, e);
                None
            }
        }
    }

    /// Persist `state`; store faults are logged and ignored
    pub fn save(&self, state: RetryState) {
        if let Err(e) = self.store.set(self.key, state) {
            warn!("Dropping retry state write for {}: {}", self.key, e);
        }
    }

    /// Remove any state; store faults are logged and ignored
    pub fn clear(&self) {
        if let Err(e) = self.store.delete(self.key) {
            warn!("Dropping retry state delete for {}: {}", self.key, e);
        }
    }
}
