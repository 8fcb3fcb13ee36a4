//! Counter key validation
//!
//! A counter is identified by a composite key: the location that owns the
//! numbering range and the year the range belongs to. Identifier uniqueness
//! is promised per key, never globally.
//!
//! ## Contract
//!
//! These validation rules are FROZEN:
//! - `location` must be a non-zero id
//! - `year` must fall within `1970..=9999`
//!
//! Referential existence of the location (and of the year's evidence window)
//! is checked by the caller before any allocation is attempted; this type
//! only enforces structural validity.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lowest year a counter may be scoped to
pub const MIN_YEAR: u16 = 1970;

/// Highest year a counter may be scoped to
pub const MAX_YEAR: u16 = 9999;

/// Composite key identifying one counter: `(location, year)`
///
/// At most one counter exists per key. The key is `Copy` and hashable so it
/// can index sharded maps directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterKey {
    location: u32,
    year: u16,
}

impl CounterKey {
    /// Create a validated counter key
    ///
    /// # Examples
    ///
    /// ```
    /// use partmint_core::key::CounterKey;
    ///
    /// assert!(CounterKey::new(42, 2024).is_ok());
    /// assert!(CounterKey::new(0, 2024).is_err()); // location id zero
    /// assert!(CounterKey::new(42, 1901).is_err()); // year out of range
    /// ```
    pub fn new(location: u32, year: u16) -> Result<Self, KeyError> {
        if location == 0 {
            return Err(KeyError::LocationZero);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(KeyError::YearOutOfRange { year });
        }
        Ok(CounterKey { location, year })
    }

    /// The location component
    pub fn location(&self) -> u32 {
        self.location
    }

    /// The year component
    pub fn year(&self) -> u16 {
        self.year
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.location, self.year)
    }
}

/// Counter key validation errors
///
/// These errors map to the `key_invalid` reason code at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// Location id is zero (reserved, never assigned)
    #[error("location id cannot be zero")]
    LocationZero,

    /// Year falls outside the supported range
    #[error("year {year} outside supported range {}..={}", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange {
        /// The rejected year
        year: u16,
    },
}
