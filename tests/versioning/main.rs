//! Versioning integration tests
//!
//! These suites exercise the two halves of optimistic concurrency control
//! end-to-end:
//!
//! 1. **Gate** - the pre-flight tag check matrix on the catalog surface
//! 2. **Race** - two writers passing the gate on the same tag, with the
//!    store's conditional write letting exactly one commit
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test --test versioning
//! ```

use serde::{Deserialize, Serialize};

mod gate;

/// Versioned domain payload used across the suites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub code: String,
    pub quantity: u32,
}

pub fn package() -> Package {
    Package {
        code: "0001".to_string(),
        quantity: 3,
    }
}

/// Install a subscriber so `RUST_LOG` surfaces kernel tracing in test output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .try_init();
}
