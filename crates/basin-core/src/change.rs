//! Catalog change model.
//!
//! A change is a pure description of one mutation to a catalog record. The
//! registry applies an ordered list of changes to a working copy and commits
//! the result atomically; order matters because later changes overwrite
//! earlier ones on the same key.
//!
//! The set of changes is closed: every variant has an explicit apply arm, so
//! adding a variant is a compile-time-checked change rather than a runtime
//! dispatch concern. Unknown or malformed change descriptions fail to decode
//! at the boundary and never reach the registry.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// A single described mutation of a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CatalogChange {
    /// Replaces the catalog comment.
    #[serde(rename_all = "camelCase")]
    SetComment {
        /// The new comment text.
        comment: String,
    },

    /// Inserts or overwrites one property.
    #[serde(rename_all = "camelCase")]
    SetProperty {
        /// Property key.
        key: String,
        /// Property value.
        value: String,
    },

    /// Removes one property. Removing an absent key is a no-op, not an
    /// error.
    #[serde(rename_all = "camelCase")]
    RemoveProperty {
        /// Property key.
        key: String,
    },
}

impl CatalogChange {
    /// Creates a comment replacement.
    #[must_use]
    pub fn set_comment(comment: impl Into<String>) -> Self {
        Self::SetComment {
            comment: comment.into(),
        }
    }

    /// Creates a property upsert.
    #[must_use]
    pub fn set_property(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetProperty {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a property removal.
    #[must_use]
    pub fn remove_property(key: impl Into<String>) -> Self {
        Self::RemoveProperty { key: key.into() }
    }

    /// Applies this change to a working copy of a catalog.
    ///
    /// Pure state transformation: audit metadata and the revision marker are
    /// the registry's responsibility, not the change model's.
    pub fn apply_to(&self, catalog: &mut Catalog) {
        match self {
            Self::SetComment { comment } => {
                catalog.comment = Some(comment.clone());
            }
            Self::SetProperty { key, value } => {
                catalog.properties.insert(key.clone(), value.clone());
            }
            Self::RemoveProperty { key } => {
                catalog.properties.remove(key);
            }
        }
    }
}
