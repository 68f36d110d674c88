//! The catalog registry engine.
//!
//! Resolves identifiers against the namespace hierarchy, enforces
//! existence/uniqueness invariants, and applies ordered change sets to a
//! catalog record as a single logical operation.
//!
//! The critical invariants are:
//! - create is fenced by the store's insert-if-absent: one creator wins
//! - alter commits through compare-and-swap keyed on the revision it loaded;
//!   a failed swap surfaces `ConcurrentModification` and is never retried
//! - no partial change application is ever persisted
//! - drop is idempotent: `false` means "nothing to delete", not a failure

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use basin_core::observability::registry_span;
use basin_core::{
    Catalog, CatalogAction, CatalogChange, CatalogIdent, CatalogStore, CatalogType, Error,
    EventEmitter, MetalakeDirectory, Namespace, Principal, RegistryEvent, Result,
};

use crate::config::RegistryConfig;

/// Request to create a new catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogRequest {
    /// Fully-qualified identifier for the new catalog.
    pub ident: CatalogIdent,

    /// Kind of data source the catalog fronts.
    pub catalog_type: CatalogType,

    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Configuration properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl CreateCatalogRequest {
    /// Creates a request with no comment and no properties.
    #[must_use]
    pub fn simple(ident: CatalogIdent, catalog_type: CatalogType) -> Self {
        Self {
            ident,
            catalog_type,
            comment: None,
            properties: BTreeMap::new(),
        }
    }
}

/// The catalog lifecycle engine.
///
/// Holds no in-process mutable state of its own; all shared state lives
/// behind the persistence port, so one registry value can be shared across
/// any number of concurrent callers.
pub struct CatalogRegistry {
    store: Arc<dyn CatalogStore>,
    directory: Arc<dyn MetalakeDirectory>,
    events: EventEmitter,
    config: RegistryConfig,
}

impl std::fmt::Debug for CatalogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRegistry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CatalogRegistry {
    /// Creates a registry over the given ports with default configuration
    /// and tracing-backed event emission.
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, directory: Arc<dyn MetalakeDirectory>) -> Self {
        Self {
            store,
            directory,
            events: EventEmitter::with_tracing(),
            config: RegistryConfig::default(),
        }
    }

    /// Replaces the event emitter.
    #[must_use]
    pub fn with_events(mut self, events: EventEmitter) -> Self {
        self.events = events;
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Lists all catalogs under `namespace`, sorted by catalog name.
    ///
    /// An existing namespace with zero catalogs yields an empty vec, not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`Error::NamespaceNotFound`] if the metalake does not exist
    /// - [`Error::Unavailable`] on collaborator faults
    pub async fn list_catalogs(&self, namespace: &Namespace) -> Result<Vec<Catalog>> {
        let span = registry_span("list_catalogs", namespace.metalake());
        async {
            self.ensure_metalake(namespace).await?;

            let mut catalogs = self.store.list(namespace).await?;
            catalogs.sort_by(|a, b| a.ident.name().cmp(b.ident.name()));

            tracing::debug!(count = catalogs.len(), "listed catalogs");
            Ok(catalogs)
        }
        .instrument(span)
        .await
        .inspect_err(|e| Self::log_failure("list_catalogs", e))
    }

    /// Creates a catalog and returns the persisted snapshot.
    ///
    /// The uniqueness check and the write are one atomic insert-if-absent:
    /// of any number of concurrent creators of one identifier, exactly one
    /// wins and the rest observe [`Error::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the payload violates configured limits
    /// - [`Error::NamespaceNotFound`] if the metalake does not exist
    /// - [`Error::AlreadyExists`] if a record already exists at the identifier
    /// - [`Error::Unavailable`] on collaborator faults
    pub async fn create_catalog(
        &self,
        request: CreateCatalogRequest,
        principal: &Principal,
    ) -> Result<Catalog> {
        let span = registry_span("create_catalog", request.ident.metalake());
        async {
            if let Some(comment) = &request.comment {
                self.config.check_comment(comment)?;
            }
            self.config.check_properties(&request.properties)?;

            self.ensure_metalake(request.ident.namespace()).await?;

            let catalog = Catalog::new(
                request.ident,
                request.catalog_type,
                request.comment,
                request.properties,
                principal.clone(),
            );

            if !self.store.insert_if_absent(catalog.clone()).await? {
                tracing::warn!(ident = %catalog.ident, "create lost to existing catalog");
                return Err(Error::already_exists(&catalog.ident));
            }

            self.events.emit(RegistryEvent::new(
                CatalogAction::Created,
                catalog.ident.clone(),
                Some(catalog.revision),
                principal.clone(),
            ));

            Ok(catalog)
        }
        .instrument(span)
        .await
        .inspect_err(|e| Self::log_failure("create_catalog", e))
    }

    /// Loads the current persisted snapshot at `ident`. Read-only.
    ///
    /// # Errors
    ///
    /// - [`Error::NamespaceNotFound`] if the metalake does not exist
    /// - [`Error::CatalogNotFound`] if no record exists at the identifier
    /// - [`Error::Unavailable`] on collaborator faults
    pub async fn load_catalog(&self, ident: &CatalogIdent) -> Result<Catalog> {
        let span = registry_span("load_catalog", ident.metalake());
        async {
            self.ensure_metalake(ident.namespace()).await?;

            self.store
                .get(ident)
                .await?
                .ok_or_else(|| Error::catalog_not_found(ident))
        }
        .instrument(span)
        .await
        .inspect_err(|e| Self::log_failure("load_catalog", e))
    }

    /// Applies an ordered change set to the catalog at `ident` and returns
    /// the committed snapshot.
    ///
    /// Changes are applied left-to-right to a working copy; later changes
    /// overwrite earlier ones on the same key. The commit is fenced on the
    /// revision the record was loaded with: if the stored revision advanced
    /// in the meantime (a concurrent alter or drop interleaved), the whole
    /// operation fails with [`Error::ConcurrentModification`] and nothing is
    /// persisted. Retry policy belongs to the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if a change violates configured limits
    /// - [`Error::CatalogNotFound`] if the identifier does not resolve
    /// - [`Error::ConcurrentModification`] if the commit precondition failed
    /// - [`Error::Unavailable`] on collaborator faults
    pub async fn alter_catalog(
        &self,
        ident: &CatalogIdent,
        changes: &[CatalogChange],
        principal: &Principal,
    ) -> Result<Catalog> {
        let span = registry_span("alter_catalog", ident.metalake());
        async {
            self.check_changes(changes)?;

            let current = self
                .store
                .get(ident)
                .await?
                .ok_or_else(|| Error::catalog_not_found(ident))?;

            let mut working = current.clone();
            for change in changes {
                change.apply_to(&mut working);
            }

            if working.properties.len() > self.config.max_properties {
                return Err(Error::invalid_argument(format!(
                    "too many properties after change set ({} > {})",
                    working.properties.len(),
                    self.config.max_properties
                )));
            }

            working
                .audit
                .record_modification(principal.clone(), Utc::now());
            working.revision = current.revision.next();

            if !self
                .store
                .compare_and_swap(ident, current.revision, working.clone())
                .await?
            {
                tracing::warn!(
                    ident = %ident,
                    loaded_revision = current.revision.value(),
                    "alter lost optimistic-concurrency race"
                );
                return Err(Error::concurrent_modification(ident));
            }

            self.events.emit(RegistryEvent::new(
                CatalogAction::Altered,
                working.ident.clone(),
                Some(working.revision),
                principal.clone(),
            ));

            Ok(working)
        }
        .instrument(span)
        .await
        .inspect_err(|e| Self::log_failure("alter_catalog", e))
    }

    /// Drops the catalog at `ident`.
    ///
    /// Returns `true` if a record existed and was removed, `false` if there
    /// was nothing to drop — repeated drops are benign, and a missing
    /// metalake is observably identical to a missing catalog here, so the
    /// metalake directory is not consulted.
    ///
    /// # Errors
    ///
    /// - [`Error::Unavailable`] on collaborator faults (a genuine failed
    ///   deletion is an error, never `false`)
    pub async fn drop_catalog(&self, ident: &CatalogIdent, principal: &Principal) -> Result<bool> {
        let span = registry_span("drop_catalog", ident.metalake());
        async {
            let dropped = self.store.compare_and_delete(ident).await?;

            if dropped {
                self.events.emit(RegistryEvent::new(
                    CatalogAction::Dropped,
                    ident.clone(),
                    None,
                    principal.clone(),
                ));
            } else {
                tracing::debug!(ident = %ident, "drop found nothing to delete");
            }

            Ok(dropped)
        }
        .instrument(span)
        .await
        .inspect_err(|e| Self::log_failure("drop_catalog", e))
    }

    async fn ensure_metalake(&self, namespace: &Namespace) -> Result<()> {
        if self.directory.exists(namespace).await? {
            Ok(())
        } else {
            tracing::warn!(namespace = %namespace, "metalake does not exist");
            Err(Error::namespace_not_found(namespace))
        }
    }

    /// Validates change payloads against configured limits, before any
    /// storage access.
    fn check_changes(&self, changes: &[CatalogChange]) -> Result<()> {
        for change in changes {
            match change {
                CatalogChange::SetComment { comment } => self.config.check_comment(comment)?,
                CatalogChange::SetProperty { key, value } => {
                    self.config.check_property(key, value)?;
                }
                CatalogChange::RemoveProperty { .. } => {}
            }
        }
        Ok(())
    }

    fn log_failure(op: &str, err: &Error) {
        // Infrastructure faults get full context; contract outcomes
        // (not-found, conflicts) are already logged at their source.
        if matches!(err, Error::Unavailable { .. } | Error::Internal { .. }) {
            tracing::error!(target: "registry", op, error = %err, "operation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basin_core::{MemoryCatalogStore, StaticMetalakeDirectory};

    fn registry() -> CatalogRegistry {
        CatalogRegistry::new(
            Arc::new(MemoryCatalogStore::new()),
            Arc::new(StaticMetalakeDirectory::with_metalakes(["prod-lake"])),
        )
    }

    fn ident(name: &str) -> CatalogIdent {
        CatalogIdent::of("prod-lake", name).expect("valid ident")
    }

    #[tokio::test]
    async fn create_then_load_roundtrip() {
        let registry = registry();
        let mut request =
            CreateCatalogRequest::simple(ident("warehouse"), CatalogType::Relational);
        request.comment = Some("orders warehouse".to_string());
        request
            .properties
            .insert("uri".to_string(), "jdbc:postgresql://db".to_string());

        let created = registry
            .create_catalog(request.clone(), &Principal::anonymous())
            .await
            .expect("create");

        let loaded = registry
            .load_catalog(&ident("warehouse"))
            .await
            .expect("load");

        assert_eq!(loaded, created);
        assert_eq!(loaded.catalog_type, request.catalog_type);
        assert_eq!(loaded.comment, request.comment);
        assert_eq!(loaded.properties, request.properties);
    }

    #[tokio::test]
    async fn create_rejects_missing_metalake() {
        let registry = registry();
        let request = CreateCatalogRequest::simple(
            CatalogIdent::of("other-lake", "warehouse").expect("valid"),
            CatalogType::Fileset,
        );

        let result = registry
            .create_catalog(request, &Principal::anonymous())
            .await;
        assert!(matches!(result, Err(Error::NamespaceNotFound { .. })));
    }

    #[tokio::test]
    async fn create_enforces_config_limits() {
        let registry = registry().with_config(RegistryConfig {
            max_comment_bytes: 4,
            ..RegistryConfig::default()
        });

        let mut request = CreateCatalogRequest::simple(ident("warehouse"), CatalogType::Model);
        request.comment = Some("far too long".to_string());

        let result = registry
            .create_catalog(request, &Principal::anonymous())
            .await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn alter_rejects_oversized_change_before_load() {
        let registry = registry().with_config(RegistryConfig {
            max_property_value_bytes: 2,
            ..RegistryConfig::default()
        });

        // Even against a nonexistent catalog the malformed change wins:
        // payload validation happens before any storage access.
        let result = registry
            .alter_catalog(
                &ident("missing"),
                &[CatalogChange::set_property("k", "oversized")],
                &Principal::anonymous(),
            )
            .await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn drop_does_not_require_metalake() {
        let registry = registry();
        let orphan = CatalogIdent::of("ghost-lake", "whatever").expect("valid");

        let dropped = registry
            .drop_catalog(&orphan, &Principal::anonymous())
            .await
            .expect("drop");
        assert!(!dropped);
    }
}
