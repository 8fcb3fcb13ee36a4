//! partmint — identifier allocation and optimistic versioning kernel
//!
//! The inventory application around this crate records sets, parts, packages
//! and variants. The two pieces that require real correctness reasoning under
//! concurrency live here:
//!
//! - minting short, unique, human-readable codes scoped to a
//!   (location, year) counter key, and
//! - detecting and rejecting stale concurrent edits to versioned resources.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use partmint::{
//!     Catalog, CounterKey, IdentifierAllocator, InMemoryCounterStore,
//!     InMemoryResourceStore, TagRequirement,
//! };
//!
//! // Mint a code for a new package at location 42 in 2024
//! let allocator = IdentifierAllocator::new(Arc::new(InMemoryCounterStore::new()));
//! let code = allocator.generate_for(&CounterKey::new(42, 2024)?)?;
//! assert_eq!(code, "0001");
//!
//! // Versioned lifecycle: every read emits a tag, every write checks one
//! let catalog = Catalog::new(Arc::new(InMemoryResourceStore::new()));
//! let (id, tag) = catalog.create(&my_package)?;
//! catalog.update(&id, Some(&tag), TagRequirement::Required, |pkg| {
//!     pkg.quantity += 1;
//! })?;
//! ```
//!
//! # Architecture
//!
//! Uniqueness is owned by the counter store's atomic increment; the
//! in-process key lock only reduces contention. Staleness is owned by the
//! store's conditional write; the version manager's pre-flight check only
//! classifies requests that are already stale on arrival.

pub use partmint_concurrency::{KeyGuard, KeySynchronizer, TagRequirement, VersionManager};
pub use partmint_core::{
    base36, Base36Error, CounterKey, Error, KeyError, ResourceId, Result, TagError, VersionMarker,
    VersionTag, Versioned,
};
pub use partmint_engine::{AllocatorConfig, Catalog, IdentifierAllocator, DEFAULT_CODE_WIDTH};
pub use partmint_store::{
    CounterRow, CounterStore, InMemoryCounterStore, InMemoryResourceStore, ResourceSnapshot,
    MAX_INCREMENT_ATTEMPTS,
};
