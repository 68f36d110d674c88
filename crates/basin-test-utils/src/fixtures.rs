//! Pre-built test fixtures for common test scenarios.
//!
//! Provides factory functions to create test data with sensible defaults.

use std::collections::BTreeMap;
use std::sync::Arc;

use basin_core::{
    Catalog, CatalogIdent, CatalogType, Principal, StaticMetalakeDirectory, TestEventSink,
};

use crate::store::TracingCatalogStore;

/// Test context with pre-configured ports and a capturing event sink.
pub struct TestContext {
    /// Shared tracing store.
    pub store: Arc<TracingCatalogStore>,
    /// Metalake directory pre-populated with [`Self::metalake`].
    pub directory: Arc<StaticMetalakeDirectory>,
    /// Capturing event sink for emission assertions.
    pub events: Arc<TestEventSink>,
    /// The metalake known to the directory.
    pub metalake: String,
}

impl TestContext {
    /// Creates a context whose directory knows one metalake, `test-lake`.
    pub fn new() -> Self {
        Self::with_metalake("test-lake")
    }

    /// Creates a context whose directory knows the given metalake.
    pub fn with_metalake(metalake: impl Into<String>) -> Self {
        let metalake = metalake.into();
        Self {
            store: Arc::new(TracingCatalogStore::new()),
            directory: Arc::new(StaticMetalakeDirectory::with_metalakes([metalake.clone()])),
            events: Arc::new(TestEventSink::new()),
            metalake,
        }
    }

    /// Returns an identifier under this context's metalake.
    pub fn ident(&self, name: &str) -> CatalogIdent {
        ident(&self.metalake, name)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a catalog identifier, panicking on invalid input.
pub fn ident(metalake: &str, name: &str) -> CatalogIdent {
    CatalogIdent::of(metalake, name).expect("valid test identifier")
}

/// Creates a relational catalog with one connection property.
pub fn catalog(metalake: &str, name: &str) -> Catalog {
    Catalog::new(
        ident(metalake, name),
        CatalogType::Relational,
        Some(format!("test catalog {name}")),
        sample_properties(),
        Principal::new("user:test").expect("valid principal"),
    )
}

/// Returns a small deterministic property map.
pub fn sample_properties() -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    properties.insert("uri".to_string(), "jdbc:postgresql://db/test".to_string());
    properties.insert("warehouse".to_string(), "s3://bucket/warehouse".to_string());
    properties
}
