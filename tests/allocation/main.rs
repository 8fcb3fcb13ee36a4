//! Allocation integration tests
//!
//! These suites verify the allocator's one promised property — for N
//! successful allocations on one key, N distinct codes — under actual
//! concurrent execution:
//!
//! 1. **Uniqueness** - threads racing one allocator instance
//! 2. **Multi-process** - several allocator instances sharing one store
//! 3. **Independence** - counters for different keys never interact
//! 4. **Failure** - `Unavailable` propagation and lock hygiene
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test allocation
//! ```

use partmint::CounterKey;

mod uniqueness;

/// Counter key shorthand for test bodies
fn key(location: u32, year: u16) -> CounterKey {
    CounterKey::new(location, year).unwrap()
}

/// Install a subscriber so `RUST_LOG` surfaces kernel tracing in test output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .try_init();
}
