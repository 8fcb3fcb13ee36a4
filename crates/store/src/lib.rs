//! Persisted stores for the partmint kernel
//!
//! Two stores live here, both mutated only through atomic or conditional
//! operations so that correctness never depends on in-process coordination:
//!
//! - [`CounterStore`] / [`InMemoryCounterStore`]: keyed counters with an
//!   atomic increment primitive. This is the authoritative safety boundary
//!   for identifier allocation.
//! - [`InMemoryResourceStore`]: versioned resource rows with a conditional
//!   write that refuses to apply when the modification marker has changed
//!   since it was read.
//!
//! The in-memory implementations stand in for the relational backing store;
//! sharing one instance across several service handles models several server
//! processes sharing one database.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counter;
pub mod memory;
pub mod resource;
pub mod testing;

pub use counter::{CounterRow, CounterStore, MAX_INCREMENT_ATTEMPTS};
pub use memory::InMemoryCounterStore;
pub use resource::{InMemoryResourceStore, ResourceSnapshot};
