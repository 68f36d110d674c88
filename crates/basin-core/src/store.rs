//! Persistence port for catalog records.
//!
//! The registry never talks to storage directly; it depends on this
//! contract. Concurrency correctness is delegated to two atomic primitives
//! every implementation must provide:
//!
//! - insert-if-absent, so at most one creator wins a race on an identifier
//! - compare-and-swap keyed on the revision marker, so an alter commits only
//!   if the record it loaded is still current
//!
//! Precondition failures are normal results (`Ok(false)`), never errors;
//! errors are reserved for collaborator faults (`Unavailable`) and bugs
//! (`Internal`).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{Catalog, Revision};
use crate::error::{Error, Result};
use crate::name::{CatalogIdent, Namespace};

/// Storage contract the registry depends on.
///
/// All operations fail with [`Error::Unavailable`] on transient
/// collaborator-level faults.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Reads the record at `ident`, or `None` if absent.
    async fn get(&self, ident: &CatalogIdent) -> Result<Option<Catalog>>;

    /// Inserts `catalog` only if no record exists at its identifier.
    ///
    /// Returns `false` (not an error) when a record is already present.
    /// Atomic with respect to concurrent inserters: exactly one wins.
    async fn insert_if_absent(&self, catalog: Catalog) -> Result<bool>;

    /// Lists all records under `namespace`.
    ///
    /// Returns an empty vec when nothing matches.
    ///
    /// **Ordering**: arbitrary and may vary between implementations and
    /// invocations. Callers requiring deterministic order must sort.
    async fn list(&self, namespace: &Namespace) -> Result<Vec<Catalog>>;

    /// Replaces the record at `ident` with `updated` only if the stored
    /// revision equals `expected`.
    ///
    /// Returns `false` (not an error) on revision mismatch or when the
    /// record is absent. Atomic with respect to concurrent writers.
    async fn compare_and_swap(
        &self,
        ident: &CatalogIdent,
        expected: Revision,
        updated: Catalog,
    ) -> Result<bool>;

    /// Deletes the record at `ident`.
    ///
    /// Returns `true` if a record was removed, `false` if none existed.
    async fn compare_and_delete(&self, ident: &CatalogIdent) -> Result<bool>;
}

/// In-memory catalog store for tests and local development.
///
/// Thread-safe via `RwLock`. Not suitable for production durability.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    records: Arc<RwLock<HashMap<CatalogIdent, Catalog>>>,
}

impl MemoryCatalogStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns true when the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<CatalogIdent, Catalog>>> {
        self.records.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<CatalogIdent, Catalog>>> {
        self.records.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn get(&self, ident: &CatalogIdent) -> Result<Option<Catalog>> {
        Ok(self.read()?.get(ident).cloned())
    }

    async fn insert_if_absent(&self, catalog: Catalog) -> Result<bool> {
        let mut records = self.write()?;
        if records.contains_key(&catalog.ident) {
            return Ok(false);
        }
        records.insert(catalog.ident.clone(), catalog);
        Ok(true)
    }

    async fn list(&self, namespace: &Namespace) -> Result<Vec<Catalog>> {
        Ok(self
            .read()?
            .values()
            .filter(|c| c.ident.namespace() == namespace)
            .cloned()
            .collect())
    }

    async fn compare_and_swap(
        &self,
        ident: &CatalogIdent,
        expected: Revision,
        updated: Catalog,
    ) -> Result<bool> {
        let mut records = self.write()?;
        match records.get(ident) {
            Some(current) if current.revision == expected => {
                records.insert(ident.clone(), updated);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn compare_and_delete(&self, ident: &CatalogIdent) -> Result<bool> {
        Ok(self.write()?.remove(ident).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::catalog::{CatalogType, Principal};

    fn catalog(metalake: &str, name: &str) -> Catalog {
        Catalog::new(
            CatalogIdent::of(metalake, name).expect("valid ident"),
            CatalogType::Relational,
            None,
            BTreeMap::new(),
            Principal::anonymous(),
        )
    }

    #[tokio::test]
    async fn get_absent_returns_none() {
        let store = MemoryCatalogStore::new();
        let ident = CatalogIdent::of("prod-lake", "warehouse").expect("valid");
        assert!(store.get(&ident).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn insert_if_absent_single_winner() {
        let store = MemoryCatalogStore::new();
        let first = catalog("prod-lake", "warehouse");
        let second = catalog("prod-lake", "warehouse");

        assert!(store.insert_if_absent(first.clone()).await.expect("insert"));
        assert!(!store.insert_if_absent(second).await.expect("insert"));

        // The losing insert must not have replaced the winner's record.
        let stored = store
            .get(&first.ident)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(stored.audit.created_at, first.audit.created_at);
    }

    #[tokio::test]
    async fn list_filters_by_namespace() {
        let store = MemoryCatalogStore::new();
        store
            .insert_if_absent(catalog("prod-lake", "warehouse"))
            .await
            .expect("insert");
        store
            .insert_if_absent(catalog("prod-lake", "streams"))
            .await
            .expect("insert");
        store
            .insert_if_absent(catalog("dev-lake", "scratch"))
            .await
            .expect("insert");

        let ns = Namespace::of("prod-lake").expect("valid");
        let listed = store.list(&ns).await.expect("list");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|c| c.ident.metalake() == "prod-lake"));

        let empty = Namespace::of("other-lake").expect("valid");
        assert!(store.list(&empty).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn compare_and_swap_requires_current_revision() {
        let store = MemoryCatalogStore::new();
        let original = catalog("prod-lake", "warehouse");
        let ident = original.ident.clone();
        store
            .insert_if_absent(original.clone())
            .await
            .expect("insert");

        let mut updated = original.clone();
        updated.comment = Some("updated".to_string());
        updated.revision = original.revision.next();

        // Matching expected revision commits.
        assert!(
            store
                .compare_and_swap(&ident, original.revision, updated.clone())
                .await
                .expect("cas")
        );

        // Stale expected revision is rejected and leaves the record alone.
        let mut stale = original.clone();
        stale.comment = Some("stale".to_string());
        assert!(
            !store
                .compare_and_swap(&ident, original.revision, stale)
                .await
                .expect("cas")
        );

        let stored = store.get(&ident).await.expect("get").expect("present");
        assert_eq!(stored.comment.as_deref(), Some("updated"));
        assert_eq!(stored.revision, original.revision.next());
    }

    #[tokio::test]
    async fn compare_and_swap_absent_is_false() {
        let store = MemoryCatalogStore::new();
        let c = catalog("prod-lake", "warehouse");
        let ident = c.ident.clone();
        assert!(
            !store
                .compare_and_swap(&ident, Revision::initial(), c)
                .await
                .expect("cas")
        );
    }

    #[tokio::test]
    async fn compare_and_delete_is_idempotent() {
        let store = MemoryCatalogStore::new();
        let c = catalog("prod-lake", "warehouse");
        let ident = c.ident.clone();
        store.insert_if_absent(c).await.expect("insert");

        assert!(store.compare_and_delete(&ident).await.expect("delete"));
        assert!(!store.compare_and_delete(&ident).await.expect("delete"));
        assert!(store.is_empty().expect("len"));
    }
}
