//! Test catalog store with operation tracing and failure injection.
//!
//! Wraps the in-memory store, records every port call for test assertions,
//! and can be armed to fail operations on matching identifiers with
//! `Unavailable` — the same classification a real store uses for transient
//! infrastructure faults.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use basin_core::{
    Catalog, CatalogIdent, CatalogStore, Error, MemoryCatalogStore, Namespace, Result, Revision,
};

/// Record of a store operation for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStoreOp {
    /// Get operation.
    Get {
        /// Identifier that was read.
        ident: String,
    },
    /// Insert-if-absent operation.
    InsertIfAbsent {
        /// Identifier that was written.
        ident: String,
    },
    /// List operation.
    List {
        /// Namespace that was listed.
        namespace: String,
    },
    /// Compare-and-swap operation.
    CompareAndSwap {
        /// Identifier that was written.
        ident: String,
        /// Expected revision carried by the writer.
        expected: u64,
    },
    /// Compare-and-delete operation.
    CompareAndDelete {
        /// Identifier that was deleted.
        ident: String,
    },
}

/// In-memory catalog store with operation tracing.
///
/// Records all operations for later assertion in tests.
#[derive(Debug, Default)]
pub struct TracingCatalogStore {
    inner: MemoryCatalogStore,
    operations: Arc<Mutex<Vec<CatalogStoreOp>>>,
    fail_prefixes: Arc<Mutex<Vec<String>>>,
}

impl TracingCatalogStore {
    /// Creates a new empty tracing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wrapped in-memory store.
    pub fn inner(&self) -> &MemoryCatalogStore {
        &self.inner
    }

    /// Returns all recorded operations.
    pub fn operations(&self) -> Vec<CatalogStoreOp> {
        self.operations.lock().expect("lock").clone()
    }

    /// Clears recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().expect("lock").clear();
    }

    /// Injects an `Unavailable` failure for every operation whose canonical
    /// identifier (or namespace) starts with the given prefix.
    pub fn inject_failure(&self, prefix: impl Into<String>) {
        self.fail_prefixes.lock().expect("lock").push(prefix.into());
    }

    /// Clears all injected failures.
    pub fn clear_failures(&self) {
        self.fail_prefixes.lock().expect("lock").clear();
    }

    fn record(&self, op: CatalogStoreOp) {
        self.operations.lock().expect("lock").push(op);
    }

    fn check_failure(&self, target: &str) -> Result<()> {
        let prefixes = self.fail_prefixes.lock().expect("lock");
        if prefixes.iter().any(|p| target.starts_with(p.as_str())) {
            return Err(Error::unavailable(format!(
                "injected failure for '{target}'"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for TracingCatalogStore {
    async fn get(&self, ident: &CatalogIdent) -> Result<Option<Catalog>> {
        self.record(CatalogStoreOp::Get {
            ident: ident.to_string(),
        });
        self.check_failure(&ident.to_string())?;
        self.inner.get(ident).await
    }

    async fn insert_if_absent(&self, catalog: Catalog) -> Result<bool> {
        self.record(CatalogStoreOp::InsertIfAbsent {
            ident: catalog.ident.to_string(),
        });
        self.check_failure(&catalog.ident.to_string())?;
        self.inner.insert_if_absent(catalog).await
    }

    async fn list(&self, namespace: &Namespace) -> Result<Vec<Catalog>> {
        self.record(CatalogStoreOp::List {
            namespace: namespace.to_string(),
        });
        self.check_failure(&namespace.to_string())?;
        self.inner.list(namespace).await
    }

    async fn compare_and_swap(
        &self,
        ident: &CatalogIdent,
        expected: Revision,
        updated: Catalog,
    ) -> Result<bool> {
        self.record(CatalogStoreOp::CompareAndSwap {
            ident: ident.to_string(),
            expected: expected.value(),
        });
        self.check_failure(&ident.to_string())?;
        self.inner.compare_and_swap(ident, expected, updated).await
    }

    async fn compare_and_delete(&self, ident: &CatalogIdent) -> Result<bool> {
        self.record(CatalogStoreOp::CompareAndDelete {
            ident: ident.to_string(),
        });
        self.check_failure(&ident.to_string())?;
        self.inner.compare_and_delete(ident).await
    }
}
