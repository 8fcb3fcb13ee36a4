//! Versioned resource store
//!
//! Rows pair a JSON-encoded payload with a [`VersionMarker`] and a soft-delete
//! flag. All mutations go through conditional writes: a write applies only if
//! the stored revision still equals the revision the writer read, otherwise it
//! refuses with `Error::Conflict` and changes nothing. This is the
//! authoritative half of optimistic concurrency control; the pre-flight tag
//! check in the version manager only filters requests that are already stale.
//!
//! Resources are never hard-deleted: scrap and restore flip the soft-delete
//! flag through the same conditional path, and both advance the marker.

use dashmap::DashMap;
use partmint_core::{Error, ResourceId, Result, VersionMarker, Versioned};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// Serialize a payload for storage
fn to_stored<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(payload).map_err(|e| Error::Serialization(e.to_string()))
}

/// Deserialize a payload from storage
fn from_stored<T: DeserializeOwned>(encoded: &str) -> Result<T> {
    serde_json::from_str(encoded).map_err(|e| Error::Serialization(e.to_string()))
}

/// Stored row: encoded payload plus versioning state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResourceRow {
    payload: String,
    marker: VersionMarker,
    scrapped: bool,
}

/// Point-in-time view of one resource
///
/// Decoded payload plus the marker and soft-delete flag as of the read.
/// Implements [`Versioned`], so a snapshot is what the version manager
/// checks caller-supplied tags against.
#[derive(Debug, Clone)]
pub struct ResourceSnapshot<T> {
    /// The resource's identity
    pub id: ResourceId,
    /// Decoded payload
    pub payload: T,
    /// Modification marker as of the read
    pub marker: VersionMarker,
    /// Soft-delete flag as of the read
    pub scrapped: bool,
}

impl<T> Versioned for ResourceSnapshot<T> {
    fn marker(&self) -> &VersionMarker {
        &self.marker
    }
}

/// Sharded in-memory table of versioned resources
///
/// Share one instance through an `Arc` to model several server processes
/// against one backing table.
#[derive(Debug)]
pub struct InMemoryResourceStore<T> {
    rows: DashMap<ResourceId, ResourceRow>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Default for InMemoryResourceStore<T> {
    fn default() -> Self {
        InMemoryResourceStore {
            rows: DashMap::new(),
            _payload: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> InMemoryResourceStore<T> {
    /// Create an empty resource table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new resource; the marker starts at revision 1
    pub fn insert(&self, payload: &T) -> Result<(ResourceId, VersionMarker)> {
        let encoded = to_stored(payload)?;
        let id = ResourceId::new();
        let marker = VersionMarker::initial();
        self.rows.insert(
            id,
            ResourceRow {
                payload: encoded,
                marker,
                scrapped: false,
            },
        );
        Ok((id, marker))
    }

    /// Load a snapshot of the resource
    pub fn get(&self, id: &ResourceId) -> Result<ResourceSnapshot<T>> {
        let row = self.rows.get(id).ok_or(Error::NotFound(*id))?;
        Ok(ResourceSnapshot {
            id: *id,
            payload: from_stored(&row.payload)?,
            marker: row.marker,
            scrapped: row.scrapped,
        })
    }

    /// Conditionally mutate the payload
    ///
    /// Applies `mutate` and advances the marker only if the stored revision
    /// still equals `expected_revision`. A mismatch means another writer
    /// committed after the caller's read: the row is left untouched and the
    /// outcome is `Error::Conflict`.
    ///
    /// The row's entry lock is held for the whole read-mutate-write, so two
    /// writers can never both apply on top of the same revision.
    pub fn update_if(
        &self,
        id: &ResourceId,
        expected_revision: u64,
        mutate: impl FnOnce(&mut T),
    ) -> Result<VersionMarker> {
        let mut row = self.rows.get_mut(id).ok_or(Error::NotFound(*id))?;
        if row.marker.revision != expected_revision {
            debug!(
                %id,
                expected = expected_revision,
                found = row.marker.revision,
                "conditional write refused"
            );
            return Err(Error::Conflict {
                expected: expected_revision,
                found: row.marker.revision,
            });
        }

        let mut payload: T = from_stored(&row.payload)?;
        mutate(&mut payload);
        let encoded = to_stored(&payload)?;

        row.payload = encoded;
        row.marker = row.marker.advance();
        Ok(row.marker)
    }

    /// Conditionally set the soft-delete flag
    ///
    /// Scrap (`true`) and restore (`false`) go through the same conditional
    /// path as payload updates; an accepted transition advances the marker
    /// even though the payload is unchanged.
    pub fn set_scrapped_if(
        &self,
        id: &ResourceId,
        expected_revision: u64,
        scrapped: bool,
    ) -> Result<VersionMarker> {
        let mut row = self.rows.get_mut(id).ok_or(Error::NotFound(*id))?;
        if row.marker.revision != expected_revision {
            debug!(
                %id,
                expected = expected_revision,
                found = row.marker.revision,
                scrapped,
                "conditional scrap/restore refused"
            );
            return Err(Error::Conflict {
                expected: expected_revision,
                found: row.marker.revision,
            });
        }

        row.scrapped = scrapped;
        row.marker = row.marker.advance();
        Ok(row.marker)
    }

    /// Number of resources, scrapped ones included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no resources
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
