//! # basin-registry
//!
//! Catalog lifecycle and change-application engine for Basin.
//!
//! This crate implements the registry domain:
//!
//! - **Lifecycle**: enumerate, create, load, alter, and drop catalogs under
//!   a metalake namespace
//! - **Atomic change application**: an ordered change set commits entirely
//!   or not at all, fenced by the record's revision marker
//! - **Classified failures**: every outcome is one of the stable error kinds
//!   a transport layer maps to protocol responses
//!
//! ## Architecture
//!
//! The registry holds no shared mutable state of its own. It resolves names,
//! enforces existence and uniqueness invariants, and delegates concurrency
//! correctness to the persistence port's two atomic primitives:
//! insert-if-absent for create and revision-keyed compare-and-swap for
//! alter/drop. Races on one identifier resolve to exactly one winner; the
//! registry never retries on behalf of the caller.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use basin_core::prelude::*;
//! use basin_registry::{CatalogRegistry, CreateCatalogRequest};
//!
//! let registry = CatalogRegistry::new(store, directory);
//!
//! let request = CreateCatalogRequest::simple(
//!     CatalogIdent::of("prod-lake", "warehouse")?,
//!     CatalogType::Relational,
//! );
//! let catalog = registry.create_catalog(request, &Principal::anonymous()).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod registry;

// Re-export main types at crate root
pub use config::RegistryConfig;
pub use registry::{CatalogRegistry, CreateCatalogRequest};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::RegistryConfig;
    pub use crate::registry::{CatalogRegistry, CreateCatalogRequest};
}
