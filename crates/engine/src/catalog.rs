//! Versioned resource lifecycle
//!
//! `Catalog` is the surface request handlers use for versioned entities:
//! every read hands back the current tag for the response, every mutation
//! runs the caller's tag through the version gate and then commits through
//! the store's conditional write.
//!
//! The gate and the conditional write answer different questions. The gate
//! rejects requests that are stale on arrival (`PreconditionFailed`,
//! `MissingRequiredVersion`). Two writers can still both pass it on the same
//! tag; the conditional write then lets exactly one commit and classifies
//! the other as `Conflict`. Neither failure is retried here — re-fetching is
//! the handler's decision.

use partmint_concurrency::{TagRequirement, VersionManager};
use partmint_core::{ResourceId, Result, VersionTag, Versioned};
use partmint_store::{InMemoryResourceStore, ResourceSnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle service for one resource type
///
/// Instances sharing a resource store model several server processes against
/// one backing table; the OCC guarantees hold across all of them.
pub struct Catalog<T> {
    store: Arc<InMemoryResourceStore<T>>,
    versions: VersionManager,
}

impl<T: Serialize + DeserializeOwned> Catalog<T> {
    /// Catalog over a (possibly shared) resource store
    pub fn new(store: Arc<InMemoryResourceStore<T>>) -> Self {
        Catalog {
            store,
            versions: VersionManager::new(),
        }
    }

    /// Create a resource; returns its id and the tag for revision 1
    pub fn create(&self, payload: &T) -> Result<(ResourceId, VersionTag)> {
        let (id, marker) = self.store.insert(payload)?;
        debug!(%id, "resource created");
        Ok((id, VersionTag::from_marker(&marker)))
    }

    /// Load a resource together with the tag to emit to the caller
    pub fn fetch(&self, id: &ResourceId) -> Result<(ResourceSnapshot<T>, VersionTag)> {
        let snapshot = self.store.get(id)?;
        let tag = snapshot.version_tag();
        Ok((snapshot, tag))
    }

    /// Mutate the payload behind the version gate
    ///
    /// Returns the tag of the new revision on success.
    pub fn update(
        &self,
        id: &ResourceId,
        provided: Option<&VersionTag>,
        requirement: TagRequirement,
        mutate: impl FnOnce(&mut T),
    ) -> Result<VersionTag> {
        let snapshot = self.store.get(id)?;
        self.versions.check(&snapshot, provided, requirement)?;
        let marker = self.store.update_if(id, snapshot.marker.revision, mutate)?;
        Ok(VersionTag::from_marker(&marker))
    }

    /// Soft-delete the resource behind the version gate
    ///
    /// Scrapping is a mutation like any other: it advances the marker, so
    /// tags issued before the scrap no longer pass the gate.
    pub fn scrap(
        &self,
        id: &ResourceId,
        provided: Option<&VersionTag>,
        requirement: TagRequirement,
    ) -> Result<VersionTag> {
        let snapshot = self.store.get(id)?;
        self.versions.check(&snapshot, provided, requirement)?;
        let marker = self
            .store
            .set_scrapped_if(id, snapshot.marker.revision, true)?;
        debug!(%id, "resource scrapped");
        Ok(VersionTag::from_marker(&marker))
    }

    /// Undo a soft delete behind the version gate
    pub fn restore(
        &self,
        id: &ResourceId,
        provided: Option<&VersionTag>,
        requirement: TagRequirement,
    ) -> Result<VersionTag> {
        let snapshot = self.store.get(id)?;
        self.versions.check(&snapshot, provided, requirement)?;
        let marker = self
            .store
            .set_scrapped_if(id, snapshot.marker.revision, false)?;
        debug!(%id, "resource restored");
        Ok(VersionTag::from_marker(&marker))
    }
}
