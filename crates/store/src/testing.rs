//! Test doubles for exercising failure paths
//!
//! Production code never depends on this module; integration suites use it
//! to drive the error paths a healthy in-memory store cannot produce.

use partmint_core::{CounterKey, Error, Result};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::counter::{CounterStore, MAX_INCREMENT_ATTEMPTS};
use crate::memory::InMemoryCounterStore;

/// Counter store that fails its next N increments with `Unavailable`
///
/// Models a backing store whose conditional writes keep losing until the
/// retry budget runs out. Once the configured failures are consumed, calls
/// pass through to a healthy in-memory store.
#[derive(Debug, Default)]
pub struct UnreliableCounterStore {
    inner: InMemoryCounterStore,
    failures_remaining: AtomicU32,
}

impl UnreliableCounterStore {
    /// Store whose next `failures` increments fail
    pub fn failing_next(failures: u32) -> Self {
        UnreliableCounterStore {
            inner: InMemoryCounterStore::new(),
            failures_remaining: AtomicU32::new(failures),
        }
    }

    /// Failures left before calls start succeeding
    pub fn failures_remaining(&self) -> u32 {
        self.failures_remaining.load(Ordering::SeqCst)
    }
}

impl CounterStore for UnreliableCounterStore {
    fn increment(&self, key: &CounterKey) -> Result<u64> {
        let consumed = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if consumed {
            return Err(Error::Unavailable {
                attempts: MAX_INCREMENT_ATTEMPTS,
            });
        }
        self.inner.increment(key)
    }

    fn current(&self, key: &CounterKey) -> Result<Option<u64>> {
        self.inner.current(key)
    }
}
