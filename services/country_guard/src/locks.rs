//! Per-actor serialization
//!
//! Validate and Commit read then write the same retry state. Two concurrent
//! attempts by one actor on one form would race on it, so hosts that allow
//! parallel resubmission take the actor's lock around each call.

use dashmap::DashMap;
use guard_types::RetryStateKey;
use parking_lot::Mutex;
use std::sync::Arc;

/// Lock table keyed by retry-state key
#[derive(Debug, Default)]
pub struct ActorLocks {
    slots: DashMap<RetryStateKey, Arc<Mutex<()>>>,
}

impl ActorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`
    pub fn with_lock<T>(&self, key: &RetryStateKey, f: impl FnOnce() -> T) -> T {
        let slot = self.slot(key);
        let _guard = slot.lock();
        f()
    }

    /// Forget the lock for `key` once its attempt chain has ended
    pub fn release(&self, key: &RetryStateKey) {
        self.slots
            .remove_if(key, |_, slot| Arc::strong_count(slot) == 1);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, key: &RetryStateKey) -> Arc<Mutex<()>> {
        // Clone out of the map so the shard lock is not held while waiting
        self.slots
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}
