//! Core types for the partmint kernel
//!
//! This crate defines the foundational types shared by the allocation and
//! versioning layers:
//! - CounterKey: composite (location, year) key for per-key counters
//! - Base36 codec: integer <-> human-readable code text
//! - VersionMarker / VersionTag: modification markers and their opaque tags
//! - ResourceId: identity for versioned resources
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod base36;
pub mod error;
pub mod key;
pub mod types;
pub mod version;

// Re-export commonly used types at the crate root
pub use base36::Base36Error;
pub use error::{Error, Result};
pub use key::{CounterKey, KeyError};
pub use types::ResourceId;
pub use version::{TagError, VersionMarker, VersionTag, Versioned};
