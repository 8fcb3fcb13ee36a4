//! Error types for the partmint kernel
//!
//! This module defines the error taxonomy used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two failure kinds are deliberately distinct:
//! - `PreconditionFailed`: the caller's tag was already stale when checked,
//!   before any write was attempted. The caller must re-fetch.
//! - `Conflict`: the caller passed the pre-flight check but another writer
//!   committed first; the conditional write refused to apply. The caller
//!   lost a race and may re-fetch and retry.

use crate::base36::Base36Error;
use crate::key::KeyError;
use crate::types::ResourceId;
use crate::version::TagError;
use thiserror::Error;

/// Result type alias for partmint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the partmint kernel
#[derive(Debug, Error)]
pub enum Error {
    /// Counter key failed validation
    #[error("invalid counter key: {0}")]
    KeyInvalid(#[from] KeyError),

    /// Backing store could not complete the operation within the retry budget
    #[error("counter store unavailable after {attempts} attempts")]
    Unavailable {
        /// Number of attempts made before giving up
        attempts: u32,
    },

    /// Resource does not exist
    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    /// Caller must supply a version tag for this operation
    #[error("a version tag is required for this operation")]
    MissingRequiredVersion,

    /// Supplied version tag is stale relative to the current resource state
    #[error("stale version tag: provided {provided}, current {current}")]
    PreconditionFailed {
        /// Tag the caller supplied
        provided: String,
        /// Tag computed from the resource at check time
        current: String,
    },

    /// A concurrent writer committed first; the conditional write did not apply
    #[error("conditional write lost the race: expected revision {expected}, found {found}")]
    Conflict {
        /// Revision the writer observed when it loaded the resource
        expected: u64,
        /// Revision found at commit time
        found: u64,
    },

    /// Input is not valid base36
    #[error("invalid base36 encoding: {0}")]
    InvalidEncoding(#[from] Base36Error),

    /// Version tag could not be parsed
    #[error("invalid version tag: {0}")]
    InvalidTag(#[from] TagError),

    /// Payload serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Get the reason code for the wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::KeyInvalid(_) => "key_invalid",
            Error::Unavailable { .. } => "unavailable",
            Error::NotFound(_) => "not_found",
            Error::MissingRequiredVersion => "missing_required_version",
            Error::PreconditionFailed { .. } => "precondition_failed",
            Error::Conflict { .. } => "conflict",
            Error::InvalidEncoding(_) => "invalid_encoding",
            Error::InvalidTag(_) => "invalid_tag",
            Error::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the failure is transient from the caller's point of view
    ///
    /// Both version-control failures are resolvable by re-fetching the
    /// resource and retrying; `Unavailable` may clear on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Unavailable { .. } | Error::PreconditionFailed { .. } | Error::Conflict { .. }
        )
    }
}
