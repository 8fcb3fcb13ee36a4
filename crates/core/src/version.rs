//! Version markers and their opaque tags
//!
//! Every versioned resource carries a `VersionMarker`. The marker's identity
//! is an explicit monotonic `revision` counter, not a wall-clock instant:
//! two writes landing in the same clock tick still produce distinct markers.
//! The timestamp on the marker is audit metadata and never participates in
//! tag derivation.
//!
//! `VersionTag` is the externally exposed form: an opaque string derived
//! deterministically from the revision, consumed back from request headers
//! and compared against a freshly computed tag. Tags are ephemeral; only the
//! marker is persisted.

use crate::base36::{self, Base36Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Prefix marking the tag format; the remainder is base36
const TAG_PREFIX: char = 'r';

/// Modification marker for a versioned resource
///
/// ## Invariants
///
/// - `revision` starts at 1 on creation and increases by exactly 1 on every
///   accepted mutation (including soft delete and restore)
/// - `revision` never decreases and is never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMarker {
    /// Monotonic mutation counter, the authoritative identity
    pub revision: u64,
    /// When the revision was produced (UTC microseconds, metadata only)
    pub updated_at_micros: i64,
}

impl VersionMarker {
    /// Marker for a freshly created resource
    pub fn initial() -> Self {
        VersionMarker {
            revision: 1,
            updated_at_micros: now_micros(),
        }
    }

    /// Marker for the next accepted mutation
    pub fn advance(&self) -> Self {
        VersionMarker {
            revision: self.revision + 1,
            updated_at_micros: now_micros(),
        }
    }
}

fn now_micros() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Opaque version tag derived from a [`VersionMarker`]
///
/// The same marker always yields the same tag; markers with different
/// revisions always yield different tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionTag(String);

impl VersionTag {
    /// Derive the tag for a marker (pure)
    pub fn from_marker(marker: &VersionMarker) -> Self {
        VersionTag(format!("{}{}", TAG_PREFIX, base36::encode(marker.revision)))
    }

    /// Parse a caller-supplied tag
    ///
    /// Accepts exactly the format `from_marker` produces (the base36 payload
    /// is accepted case-insensitively) and stores the canonical form.
    pub fn parse(input: &str) -> Result<Self, TagError> {
        if input.is_empty() {
            return Err(TagError::Empty);
        }
        let mut chars = input.chars();
        if chars.next() != Some(TAG_PREFIX) {
            return Err(TagError::MissingPrefix);
        }
        let revision = base36::decode(chars.as_str())?;
        Ok(VersionTag(format!(
            "{}{}",
            TAG_PREFIX,
            base36::encode(revision)
        )))
    }

    /// The tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Version tag parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// Tag string is empty
    #[error("tag cannot be empty")]
    Empty,

    /// Tag does not carry the expected prefix
    #[error("tag must start with '{}'", TAG_PREFIX)]
    MissingPrefix,

    /// Tag payload is not valid base36
    #[error("tag payload is not base36: {0}")]
    Payload(#[from] Base36Error),
}

/// A resource that carries a modification marker
///
/// The version manager and the catalog work exclusively through this seam,
/// so any domain entity with a marker participates in optimistic checking.
pub trait Versioned {
    /// The resource's current modification marker
    fn marker(&self) -> &VersionMarker;

    /// The tag for the current marker
    fn version_tag(&self) -> VersionTag {
        VersionTag::from_marker(self.marker())
    }
}
