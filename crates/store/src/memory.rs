//! In-memory counter store
//!
//! Rows live in a sharded concurrent map; one instance shared through an
//! `Arc` stands in for the relational counter table shared by every server
//! process.
//!
//! # Design
//!
//! The map's entry lock gives this table the atomic increment-or-insert
//! primitive directly: read-increment-write (or first insert) happens in one
//! critical section per key, so concurrent callers can never both apply on
//! top of the same observed value and no call ever needs a retry. Backing
//! stores whose conditional writes can lose implement the same trait with a
//! bounded retry loop instead, surfacing `Unavailable` once the
//! [`MAX_INCREMENT_ATTEMPTS`](crate::counter::MAX_INCREMENT_ATTEMPTS) budget
//! runs out.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use partmint_core::{CounterKey, Result};
use tracing::trace;

use crate::counter::{CounterRow, CounterStore};

/// Sharded in-memory counter table
///
/// Cheap to share: wrap in an `Arc` and hand clones to every allocator
/// instance that should see the same counters.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    rows: DashMap<CounterKey, CounterRow>,
}

impl InMemoryCounterStore {
    /// Create an empty counter table
    pub fn new() -> Self {
        InMemoryCounterStore {
            rows: DashMap::new(),
        }
    }

    /// Number of keys with at least one allocation
    pub fn key_count(&self) -> usize {
        self.rows.len()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn increment(&self, key: &CounterKey) -> Result<u64> {
        // Entry holds the shard write lock across the read-increment-write
        match self.rows.entry(*key) {
            Entry::Occupied(mut slot) => {
                let next = slot.get().value + 1;
                *slot.get_mut() = CounterRow::new(next);
                Ok(next)
            }
            Entry::Vacant(slot) => {
                trace!(%key, "creating counter on first allocation");
                slot.insert(CounterRow::new(1));
                Ok(1)
            }
        }
    }

    fn current(&self, key: &CounterKey) -> Result<Option<u64>> {
        Ok(self.rows.get(key).map(|row| row.value))
    }
}
