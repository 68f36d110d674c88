//! Registry configuration.
//!
//! Limits on caller-supplied payloads, enforced before any storage access.
//! Violations surface as `InvalidArgument` and are never partially applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use basin_core::{Error, Result};

/// Limits applied to create and alter payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Maximum number of properties per catalog.
    pub max_properties: usize,
    /// Maximum property key length, in bytes.
    pub max_property_key_bytes: usize,
    /// Maximum property value length, in bytes.
    pub max_property_value_bytes: usize,
    /// Maximum comment length, in bytes.
    pub max_comment_bytes: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_properties: 256,
            max_property_key_bytes: 256,
            max_property_value_bytes: 4096,
            max_comment_bytes: 4096,
        }
    }
}

impl RegistryConfig {
    /// Checks one property key/value pair against the limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the key is empty or either
    /// side exceeds its byte limit.
    pub fn check_property(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::invalid_argument("property key cannot be empty"));
        }
        if key.len() > self.max_property_key_bytes {
            return Err(Error::invalid_argument(format!(
                "property key '{key}' is too long ({} > {} bytes)",
                key.len(),
                self.max_property_key_bytes
            )));
        }
        if value.len() > self.max_property_value_bytes {
            return Err(Error::invalid_argument(format!(
                "value of property '{key}' is too long ({} > {} bytes)",
                value.len(),
                self.max_property_value_bytes
            )));
        }
        Ok(())
    }

    /// Checks a full property map against the limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the map has too many entries
    /// or any entry violates [`check_property`](Self::check_property).
    pub fn check_properties(&self, properties: &BTreeMap<String, String>) -> Result<()> {
        if properties.len() > self.max_properties {
            return Err(Error::invalid_argument(format!(
                "too many properties ({} > {})",
                properties.len(),
                self.max_properties
            )));
        }
        for (key, value) in properties {
            self.check_property(key, value)?;
        }
        Ok(())
    }

    /// Checks a comment against the limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the comment exceeds its byte
    /// limit.
    pub fn check_comment(&self, comment: &str) -> Result<()> {
        if comment.len() > self.max_comment_bytes {
            return Err(Error::invalid_argument(format!(
                "comment is too long ({} > {} bytes)",
                comment.len(),
                self.max_comment_bytes
            )));
        }
        Ok(())
    }
}
