//! Pre-flight optimistic version checking
//!
//! The version manager validates a caller-supplied tag against the tag
//! freshly computed from the loaded resource and classifies mismatches. It is
//! a gate, not a guarantee: two callers can both pass the check before either
//! commits. The authoritative verdict belongs to the store's conditional
//! write, which classifies the loser of such a race as `Conflict` — a
//! distinct failure from the `PreconditionFailed` this gate produces.
//!
//! The manager never retries; whether to re-fetch and try again is the
//! calling handler's policy.

use partmint_core::{Error, Result, VersionTag, Versioned};
use tracing::debug;

/// Whether a request must carry a version tag
///
/// Read-modify-write handlers typically demand a tag (`Required`); endpoints
/// that tolerate blind writes may accept its absence (`Optional`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRequirement {
    /// An absent tag skips optimistic checking
    Optional,
    /// An absent tag is rejected with `MissingRequiredVersion`
    Required,
}

/// Validates caller-supplied version tags against loaded resources
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionManager;

impl VersionManager {
    /// Create a version manager
    pub fn new() -> Self {
        VersionManager
    }

    /// Check a caller-supplied tag against the resource's current tag
    ///
    /// - absent tag, `Optional` → `Ok`: the caller did not ask for checking
    /// - absent tag, `Required` → `MissingRequiredVersion`
    /// - tag equal to the freshly computed one → `Ok`
    /// - tag different → `PreconditionFailed`; the caller must re-fetch
    pub fn check(
        &self,
        resource: &impl Versioned,
        provided: Option<&VersionTag>,
        requirement: TagRequirement,
    ) -> Result<()> {
        let Some(provided) = provided else {
            return match requirement {
                TagRequirement::Optional => Ok(()),
                TagRequirement::Required => Err(Error::MissingRequiredVersion),
            };
        };

        let current = resource.version_tag();
        if *provided == current {
            Ok(())
        } else {
            debug!(%provided, %current, "stale version tag rejected");
            Err(Error::PreconditionFailed {
                provided: provided.to_string(),
                current: current.to_string(),
            })
        }
    }
}
