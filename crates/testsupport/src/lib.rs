//! Test support utilities for the airline workspace.
//!
//! - Isolated stores backed by a temporary file or by memory
//! - Seed helpers that insert a small, consistent airline
//! - Assertion helpers for the error kinds callers branch on
//!
//! # Example Usage
//!
//! ```
//! use testsupport::prelude::*;
//!
//! let ctx = TestContext::in_memory().unwrap();
//! let airline = ctx.airline().unwrap();
//! let seeded = seed_network(&airline).unwrap();
//! assert!(airline.flights.exists(seeded.flight.flight_id).unwrap());
//! ```

pub mod assertions;
pub mod context;
pub mod fixtures;

/// Convenient re-exports for common testing patterns.
pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::context::*;
    pub use crate::fixtures::*;
}
