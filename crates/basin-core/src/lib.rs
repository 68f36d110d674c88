//! # basin-core
//!
//! Core abstractions for the Basin metadata registry.
//!
//! This crate provides the foundational types and ports used across all Basin
//! components:
//!
//! - **Names**: Validated namespace and catalog identifier types
//! - **Catalog Model**: The persisted catalog entity with audit metadata and
//!   an optimistic-concurrency revision marker
//! - **Change Model**: A closed set of catalog mutations applied in order
//! - **Ports**: Abstract persistence and metalake-existence contracts the
//!   registry depends on
//! - **Events**: Structured lifecycle events with pluggable sinks
//! - **Error Types**: Shared error definitions and result types
//!
//! ## Crate Boundary
//!
//! `basin-core` is the **only** crate allowed to define shared primitives.
//! The registry engine lives in `basin-registry` and talks to the outside
//! world exclusively through the ports defined here.
//!
//! ## Example
//!
//! ```rust
//! use basin_core::prelude::*;
//!
//! let ident = CatalogIdent::of("prod-lake", "warehouse").unwrap();
//! assert_eq!(ident.to_string(), "prod-lake.warehouse");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod change;
pub mod error;
pub mod event;
pub mod metalake;
pub mod name;
pub mod observability;
pub mod store;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use basin_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::{AuditInfo, Catalog, CatalogType, Principal, Revision};
    pub use crate::change::CatalogChange;
    pub use crate::error::{Error, Result};
    pub use crate::event::{CatalogAction, EventEmitter, EventSink, RegistryEvent};
    pub use crate::metalake::{MetalakeDirectory, StaticMetalakeDirectory};
    pub use crate::name::{CatalogIdent, Namespace};
    pub use crate::store::{CatalogStore, MemoryCatalogStore};
}

// Re-export key types at crate root for ergonomics
pub use catalog::{AuditInfo, Catalog, CatalogType, Principal, Revision};
pub use change::CatalogChange;
pub use error::{Error, Result};
pub use event::{CatalogAction, EventEmitter, EventSink, RegistryEvent, TestEventSink};
pub use metalake::{MetalakeDirectory, StaticMetalakeDirectory};
pub use name::{CatalogIdent, Namespace};
pub use observability::{LogFormat, init_logging};
pub use store::{CatalogStore, MemoryCatalogStore};
