//! Concurrency layer for the partmint kernel
//!
//! Two concerns live here, deliberately kept apart:
//!
//! - [`KeySynchronizer`]: per-key mutual exclusion scoped to one process.
//!   This is contention relief for the counter store, never a safety
//!   mechanism; correctness must hold with zero in-process locking because
//!   other server processes share the same backing store.
//! - [`VersionManager`]: the pre-flight optimistic gate for versioned
//!   resources. It classifies stale or missing tags before a write is
//!   attempted; losing a race after passing the gate is the store's
//!   conditional write's verdict (`Conflict`), not this layer's.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keylock;
pub mod version_manager;

pub use keylock::{KeyGuard, KeySynchronizer};
pub use version_manager::{TagRequirement, VersionManager};
