//! Per-key in-process locking
//!
//! `KeySynchronizer` hands out one mutual-exclusion slot per counter key so
//! that concurrent same-process allocations for the same key queue up instead
//! of all hammering the store's conditional increment and burning its retry
//! budget. It has no cross-process effect and the store stays correct
//! without it.
//!
//! # Eviction
//!
//! The key space is unbounded (every location/year pair), so idle slots must
//! not accumulate. Each slot counts its live handles; when the last guard
//! drops, the slot is removed from the table. The removal re-checks the
//! handle count under the map's shard lock, and acquirers bump the count
//! under that same lock, so a slot can never disappear out from under a
//! waiter.

use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};
use partmint_core::CounterKey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::trace;

/// One key's lock slot
#[derive(Debug, Default)]
struct LockSlot {
    /// Whether some guard currently holds the key
    state: Mutex<bool>,
    /// Signaled on release
    unlocked: Condvar,
    /// Live handles: guards plus acquirers between table lookup and lock
    handles: AtomicUsize,
}

/// Per-key mutual exclusion for one process instance
///
/// No fairness is promised: when several callers wait on one key, release
/// wakes an arbitrary waiter. The order identifiers come out in is the order
/// the store commits increments, not request-arrival order.
#[derive(Debug, Default)]
pub struct KeySynchronizer {
    slots: DashMap<CounterKey, Arc<LockSlot>>,
}

impl KeySynchronizer {
    /// Create an empty lock table
    pub fn new() -> Self {
        KeySynchronizer {
            slots: DashMap::new(),
        }
    }

    /// Block until the calling thread holds the lock for `key`
    ///
    /// The returned guard releases on drop on every exit path, including
    /// unwinding, so an allocation that fails or is abandoned never strands
    /// the key.
    pub fn acquire(&self, key: &CounterKey) -> KeyGuard<'_> {
        let slot = {
            let entry = self.slots.entry(*key).or_default();
            // Registered under the shard lock; see module eviction notes
            entry.handles.fetch_add(1, Ordering::SeqCst);
            Arc::clone(entry.value())
        };

        let mut locked = slot.state.lock();
        while *locked {
            trace!(%key, "waiting on key lock");
            slot.unlocked.wait(&mut locked);
        }
        *locked = true;
        drop(locked);

        KeyGuard {
            table: self,
            key: *key,
            slot,
        }
    }

    /// Number of keys with a live lock slot
    ///
    /// Drops back to zero once every guard for every key has been dropped.
    pub fn tracked_keys(&self) -> usize {
        self.slots.len()
    }
}

/// Holds the lock for one key; releases on drop
#[derive(Debug)]
pub struct KeyGuard<'a> {
    table: &'a KeySynchronizer,
    key: CounterKey,
    slot: Arc<LockSlot>,
}

impl KeyGuard<'_> {
    /// The key this guard holds
    pub fn key(&self) -> &CounterKey {
        &self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        {
            let mut locked = self.slot.state.lock();
            *locked = false;
        }
        self.slot.unlocked.notify_one();

        // Last handle out removes the idle slot. Racing acquirers registered
        // their handle under the shard lock, and remove_if re-checks there.
        if self.slot.handles.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.table
                .slots
                .remove_if(&self.key, |_, slot| slot.handles.load(Ordering::SeqCst) == 0);
        }
    }
}
