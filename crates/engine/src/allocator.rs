//! Identifier allocation
//!
//! `generate_for` composes the three lower pieces: take the in-process key
//! lock, run the store's atomic increment, release, then render the
//! post-increment value as a fixed-width base36 code.
//!
//! The lock only shields the store from same-process retry storms; the
//! increment is what guarantees uniqueness, including against other server
//! processes on the same backing store. A caller that gives up after the
//! increment committed simply discards the minted value — gaps in the
//! sequence are acceptable, values are never reused and never rolled back.

use partmint_concurrency::KeySynchronizer;
use partmint_core::{base36, CounterKey, Result};
use partmint_store::CounterStore;
use std::sync::Arc;
use tracing::debug;

/// Default rendered code width; values up to 36^4 - 1 fit unpadded
pub const DEFAULT_CODE_WIDTH: usize = 4;

/// Allocation settings
#[derive(Debug, Clone, Copy)]
pub struct AllocatorConfig {
    /// Minimum rendered width; codes are left-padded with '0' up to this
    pub code_width: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            code_width: DEFAULT_CODE_WIDTH,
        }
    }
}

/// Mints unique, human-readable codes per counter key
///
/// One instance per server process. Instances sharing a counter store (the
/// multi-process deployment) allocate from the same sequences and never
/// collide; their key synchronizers are process-local and independent.
pub struct IdentifierAllocator<S: CounterStore> {
    store: Arc<S>,
    locks: KeySynchronizer,
    config: AllocatorConfig,
}

impl<S: CounterStore> IdentifierAllocator<S> {
    /// Allocator with default settings
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AllocatorConfig::default())
    }

    /// Allocator with explicit settings
    pub fn with_config(store: Arc<S>, config: AllocatorConfig) -> Self {
        IdentifierAllocator {
            store,
            locks: KeySynchronizer::new(),
            config,
        }
    }

    /// Mint the next identifier for `key`
    ///
    /// For a fixed key, no two successful calls — across any number of
    /// threads or allocator instances on one store — return the same code.
    /// Store errors propagate unchanged (`Unavailable` once the increment
    /// retry budget is exhausted); the caller translates them to its
    /// "cannot create unique identifier" failure.
    pub fn generate_for(&self, key: &CounterKey) -> Result<String> {
        let guard = self.locks.acquire(key);
        let incremented = self.store.increment(key);
        drop(guard);

        let value = incremented?;
        let code = base36::encode_padded(value, self.config.code_width);
        debug!(%key, value, %code, "identifier allocated");
        Ok(code)
    }

    /// The allocator's settings
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Number of keys currently holding an in-process lock slot
    pub fn contended_keys(&self) -> usize {
        self.locks.tracked_keys()
    }
}
