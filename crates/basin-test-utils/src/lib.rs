//! Shared test utilities for Basin integration tests.
//!
//! This crate provides:
//! - [`TracingCatalogStore`]: in-memory store with operation recording and
//!   failure injection
//! - [`TestContext`]: pre-configured ports plus a capturing event sink
//! - Factory functions for creating test data
//!
//! # Example
//!
//! ```rust,ignore
//! use basin_test_utils::{TestContext, ident};
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let ctx = TestContext::new();
//!     let ident = ident(&ctx.metalake, "warehouse");
//!     // ... run test ...
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
// Test utilities use expect/unwrap for cleaner test code - panics are acceptable in tests
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod fixtures;
pub mod store;

pub use fixtures::*;
pub use store::*;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("basin=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
