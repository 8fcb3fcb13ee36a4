//! Counter store contract
//!
//! A counter is a persisted row keyed by [`CounterKey`], holding a
//! monotonically non-decreasing value. At most one row exists per key, rows
//! are created lazily on first allocation and never deleted.

use chrono::Utc;
use partmint_core::{CounterKey, Result};
use serde::{Deserialize, Serialize};

/// Attempt budget for one `increment` call
///
/// Implementations whose conditional writes can lose retry inside this
/// budget; the retries are silent, and exhausting the budget surfaces
/// `Error::Unavailable` once to the caller. The in-memory table's increment
/// is a single atomic operation and never consumes the budget.
pub const MAX_INCREMENT_ATTEMPTS: u32 = 8;

/// Persisted counter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRow {
    /// Current counter value; never decreases
    pub value: u64,
    /// When the value was last advanced (UTC microseconds, metadata only)
    pub updated_at_micros: i64,
}

impl CounterRow {
    /// Row holding `value`, stamped now
    pub fn new(value: u64) -> Self {
        CounterRow {
            value,
            updated_at_micros: Utc::now().timestamp_micros(),
        }
    }
}

/// Keyed counters with an atomic increment primitive
///
/// ## Contract
///
/// `increment` must behave as a single atomic, conditional operation against
/// the backing store: concurrent calls for the same key, from any number of
/// processes sharing the store, never observe or return the same
/// post-increment value. Correctness must hold with zero in-process locking;
/// the key synchronizer layered above is contention relief, not a safety
/// mechanism.
///
/// Key validity (referential existence of location and year) is the caller's
/// concern; implementations trust the key.
pub trait CounterStore: Send + Sync {
    /// Advance the counter for `key` by exactly 1 and return the new value
    ///
    /// Creates the counter at value 1 if no row exists yet. Fails with
    /// `Error::Unavailable` once the internal retry budget is exhausted.
    fn increment(&self, key: &CounterKey) -> Result<u64>;

    /// Read the current value without modifying it
    ///
    /// Returns `None` if no allocation has happened for `key`. Used by
    /// diagnostics and tests; never part of the allocation path.
    fn current(&self, key: &CounterKey) -> Result<Option<u64>>;
}
