//! Catalog entity model.
//!
//! A catalog is the persisted unit of the registry: a named, typed bundle of
//! data-source configuration living under a metalake. The store owns the
//! durable copy; the registry hands callers read-only snapshots and is the
//! only component allowed to mutate a record (through the alter operation's
//! change application).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::name::CatalogIdent;

/// Kind of data source a catalog fronts.
///
/// Purely categorical: the registry attaches no behavior to the type beyond
/// storing and returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogType {
    /// Tables and views in a relational system.
    Relational,
    /// File collections on object or distributed storage.
    Fileset,
    /// Topics and streams in a messaging system.
    Messaging,
    /// Registered machine-learning models.
    Model,
}

impl CatalogType {
    /// Returns the canonical lowercase name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Fileset => "fileset",
            Self::Messaging => "messaging",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CatalogType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "relational" => Ok(Self::Relational),
            "fileset" => Ok(Self::Fileset),
            "messaging" => Ok(Self::Messaging),
            "model" => Ok(Self::Model),
            _ => Err(Error::invalid_argument(format!(
                "unknown catalog type '{s}'"
            ))),
        }
    }
}

/// Identity of the caller performing a registry operation.
///
/// Sourced from the caller's context (the registry does not authenticate);
/// recorded in audit metadata and lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal after validating it is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the principal is empty.
    pub fn new(principal: impl Into<String>) -> Result<Self> {
        let principal = principal.into();
        if principal.is_empty() {
            return Err(Error::invalid_argument("principal cannot be empty"));
        }
        Ok(Self(principal))
    }

    /// Returns the fallback principal for callers without an identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }

    /// Returns the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optimistic-concurrency revision marker.
///
/// Assigned at create, advanced by every committed alter, and used as the
/// compare-and-swap precondition when writing back. Opaque to callers beyond
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// The revision assigned to a freshly created catalog.
    #[must_use]
    pub const fn initial() -> Self {
        Self(1)
    }

    /// Returns the revision following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw revision number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Audit metadata carried by every catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// Principal that created the record.
    pub creator: Principal,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Principal of the most recent modification, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modifier: Option<Principal>,
    /// Timestamp of the most recent modification, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// Creates audit metadata for a record created by `principal` at `at`.
    #[must_use]
    pub const fn created_by(principal: Principal, at: DateTime<Utc>) -> Self {
        Self {
            creator: principal,
            created_at: at,
            last_modifier: None,
            last_modified_at: None,
        }
    }

    /// Records a modification by `principal` at `at`.
    pub fn record_modification(&mut self, principal: Principal, at: DateTime<Utc>) {
        self.last_modifier = Some(principal);
        self.last_modified_at = Some(at);
    }
}

/// The persisted catalog entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Fully-qualified identifier; the persistence key.
    pub ident: CatalogIdent,

    /// Kind of data source the catalog fronts.
    pub catalog_type: CatalogType,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Configuration properties. `BTreeMap` keeps property order (and thus
    /// serialized snapshots) deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// Audit metadata.
    pub audit: AuditInfo,

    /// Optimistic-concurrency marker; advanced only by committed alters.
    pub revision: Revision,
}

impl Catalog {
    /// Creates a new catalog record stamped as created now by `principal`.
    ///
    /// The record carries the initial revision; it only becomes durable once
    /// the store accepts it via insert-if-absent.
    #[must_use]
    pub fn new(
        ident: CatalogIdent,
        catalog_type: CatalogType,
        comment: Option<String>,
        properties: BTreeMap<String, String>,
        principal: Principal,
    ) -> Self {
        Self {
            ident,
            catalog_type,
            comment,
            properties,
            audit: AuditInfo::created_by(principal, Utc::now()),
            revision: Revision::initial(),
        }
    }
}
