//! Error types and result aliases for Basin.
//!
//! This module defines the shared error taxonomy used across all Basin
//! components. Every variant is one of the stable kinds a transport layer
//! maps to a protocol response; the registry classifies and propagates them
//! without downgrading or retrying.

use std::fmt;

/// The result type used throughout Basin.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Basin operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A malformed identifier, empty required field, or undecodable change
    /// description. Always detected before any storage access.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what made the input invalid.
        message: String,
    },

    /// The parent metalake does not exist.
    #[error("metalake not found: {namespace}")]
    NamespaceNotFound {
        /// Canonical form of the namespace that was looked up.
        namespace: String,
    },

    /// No catalog record exists at the resolved identifier.
    #[error("catalog not found: {ident}")]
    CatalogNotFound {
        /// Canonical form of the identifier that was looked up.
        ident: String,
    },

    /// A catalog already exists at the identifier (create raced or repeated).
    #[error("catalog already exists: {ident}")]
    AlreadyExists {
        /// Canonical form of the conflicting identifier.
        ident: String,
    },

    /// An optimistic-concurrency precondition failed: the stored revision
    /// advanced between load and commit.
    #[error("concurrent modification of catalog {ident}")]
    ConcurrentModification {
        /// Canonical form of the contended identifier.
        ident: String,
    },

    /// A collaborator (store or metalake directory) could not answer due to
    /// a transient infrastructure fault.
    #[error("collaborator unavailable: {message}")]
    Unavailable {
        /// Description of the transient failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An unexpected failure that should not happen in normal operation.
    /// The caller-visible message is a human-readable summary only.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl Error {
    /// Creates a new invalid-argument error with the given message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a metalake-not-found error for the given namespace.
    #[must_use]
    pub fn namespace_not_found(namespace: impl fmt::Display) -> Self {
        Self::NamespaceNotFound {
            namespace: namespace.to_string(),
        }
    }

    /// Creates a catalog-not-found error for the given identifier.
    #[must_use]
    pub fn catalog_not_found(ident: impl fmt::Display) -> Self {
        Self::CatalogNotFound {
            ident: ident.to_string(),
        }
    }

    /// Creates an already-exists error for the given identifier.
    #[must_use]
    pub fn already_exists(ident: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            ident: ident.to_string(),
        }
    }

    /// Creates a concurrent-modification error for the given identifier.
    #[must_use]
    pub fn concurrent_modification(ident: impl fmt::Display) -> Self {
        Self::ConcurrentModification {
            ident: ident.to_string(),
        }
    }

    /// Creates a new unavailable error with the given message.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unavailable error with a source cause.
    #[must_use]
    pub fn unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true for the not-found family of errors
    /// (metalake or catalog missing).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NamespaceNotFound { .. } | Self::CatalogNotFound { .. }
        )
    }

    /// Returns true when the failure is transient and a caller-side retry
    /// may succeed. The registry itself never retries.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::ConcurrentModification { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = Error::catalog_not_found("prod-lake.warehouse");
        assert_eq!(err.to_string(), "catalog not found: prod-lake.warehouse");

        let err = Error::namespace_not_found("prod-lake");
        assert_eq!(err.to_string(), "metalake not found: prod-lake");

        let err = Error::concurrent_modification("prod-lake.warehouse");
        assert_eq!(
            err.to_string(),
            "concurrent modification of catalog prod-lake.warehouse"
        );
    }

    #[test]
    fn not_found_family() {
        assert!(Error::namespace_not_found("m").is_not_found());
        assert!(Error::catalog_not_found("m.c").is_not_found());
        assert!(!Error::already_exists("m.c").is_not_found());
        assert!(!Error::invalid_argument("bad").is_not_found());
    }

    #[test]
    fn transient_family() {
        assert!(Error::unavailable("store down").is_transient());
        assert!(Error::concurrent_modification("m.c").is_transient());
        assert!(!Error::internal("boom").is_transient());
        assert!(!Error::catalog_not_found("m.c").is_transient());
    }

    #[test]
    fn unavailable_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = Error::unavailable_with_source("store timed out", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
