//! Metalake existence port.
//!
//! Metalake lifecycle is managed outside this core; the registry only needs
//! to answer "does this metalake exist" before resolving names under it.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::name::Namespace;

/// Contract answering whether a namespace's metalake exists.
#[async_trait]
pub trait MetalakeDirectory: Send + Sync + 'static {
    /// Returns whether the metalake named by `namespace` exists.
    ///
    /// Fails with [`Error::Unavailable`] when the answer cannot be
    /// determined.
    async fn exists(&self, namespace: &Namespace) -> Result<bool>;
}

/// Directory backed by a fixed, mutable set of metalake names.
///
/// Intended for tests and local development; a deployment wires the port to
/// its real namespace service.
#[derive(Debug, Default)]
pub struct StaticMetalakeDirectory {
    metalakes: RwLock<HashSet<String>>,
}

impl StaticMetalakeDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with the given metalake names.
    pub fn with_metalakes<I, S>(metalakes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metalakes: RwLock::new(metalakes.into_iter().map(Into::into).collect()),
        }
    }

    /// Registers a metalake name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock is poisoned.
    pub fn register(&self, metalake: impl Into<String>) -> Result<()> {
        self.write()?.insert(metalake.into());
        Ok(())
    }

    /// Removes a metalake name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the lock is poisoned.
    pub fn deregister(&self, metalake: &str) -> Result<()> {
        self.write()?.remove(metalake);
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashSet<String>>> {
        self.metalakes.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })
    }
}

#[async_trait]
impl MetalakeDirectory for StaticMetalakeDirectory {
    async fn exists(&self, namespace: &Namespace) -> Result<bool> {
        let metalakes = self.metalakes.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;
        Ok(metalakes.contains(namespace.metalake()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exists_reflects_registration() {
        let directory = StaticMetalakeDirectory::new();
        let ns = Namespace::of("prod-lake").expect("valid");

        assert!(!directory.exists(&ns).await.expect("exists"));

        directory.register("prod-lake").expect("register");
        assert!(directory.exists(&ns).await.expect("exists"));

        directory.deregister("prod-lake").expect("deregister");
        assert!(!directory.exists(&ns).await.expect("exists"));
    }

    #[tokio::test]
    async fn prepopulated_directory() {
        let directory = StaticMetalakeDirectory::with_metalakes(["prod-lake", "dev-lake"]);
        let prod = Namespace::of("prod-lake").expect("valid");
        let dev = Namespace::of("dev-lake").expect("valid");
        let other = Namespace::of("other-lake").expect("valid");

        assert!(directory.exists(&prod).await.expect("exists"));
        assert!(directory.exists(&dev).await.expect("exists"));
        assert!(!directory.exists(&other).await.expect("exists"));
    }
}
