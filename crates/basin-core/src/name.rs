//! Validated names for Basin entities.
//!
//! Catalogs are addressed by a compound identifier: a namespace path (the
//! metalake) plus a leaf name. Both are immutable value types with purely
//! syntactic validation — construction never touches storage.
//!
//! # Canonical form
//!
//! Segments join with `.`: a catalog `warehouse` under metalake `prod-lake`
//! is written `prod-lake.warehouse`. The separator is therefore forbidden
//! inside any segment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between namespace segments and the leaf name in the canonical
/// string form.
pub const NAME_SEPARATOR: char = '.';

/// Maximum length of a single name segment, in bytes.
const MAX_SEGMENT_BYTES: usize = 128;

fn validate_segment(segment: &str, field: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::invalid_argument(format!("{field} cannot be empty")));
    }

    if segment.len() > MAX_SEGMENT_BYTES {
        return Err(Error::invalid_argument(format!(
            "{field} '{segment}' is too long ({} > {MAX_SEGMENT_BYTES} bytes)",
            segment.len()
        )));
    }

    if segment.contains(NAME_SEPARATOR) {
        return Err(Error::invalid_argument(format!(
            "{field} '{segment}' contains the reserved separator '{NAME_SEPARATOR}'"
        )));
    }

    Ok(())
}

/// An ordered, non-empty sequence of namespace segments.
///
/// In the current two-level hierarchy a namespace always has exactly one
/// segment: the metalake name. The type still models the general sequence so
/// deeper hierarchies do not force an identifier redesign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Creates a namespace from the given segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the sequence is empty or any
    /// segment is empty, too long, or contains the separator.
    pub fn new<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(Error::invalid_argument("namespace cannot be empty"));
        }

        for segment in &segments {
            validate_segment(segment, "namespace segment")?;
        }

        Ok(Self(segments))
    }

    /// Creates the single-segment namespace for a metalake.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the metalake name is invalid.
    pub fn of(metalake: impl Into<String>) -> Result<Self> {
        Self::new([metalake.into()])
    }

    /// Returns the namespace segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the metalake name (the first segment).
    ///
    /// # Panics
    ///
    /// Never panics: construction guarantees at least one segment.
    #[must_use]
    pub fn metalake(&self) -> &str {
        &self.0[0]
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(&NAME_SEPARATOR.to_string()))
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(NAME_SEPARATOR).map(str::to_string))
    }
}

/// Fully-qualified catalog identifier: namespace plus leaf name.
///
/// Two identifiers are equal iff their namespace and name are equal; the
/// type is the lookup key for persistence and hashes accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogIdent {
    /// Parent namespace (the metalake).
    namespace: Namespace,
    /// Catalog name within the namespace.
    name: String,
}

impl CatalogIdent {
    /// Creates an identifier from an already-validated namespace and a leaf
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the leaf name is empty, too
    /// long, or contains the separator.
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_segment(&name, "catalog name")?;
        Ok(Self { namespace, name })
    }

    /// Creates an identifier from a metalake name and a catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either segment is invalid.
    pub fn of(metalake: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        Self::new(Namespace::of(metalake)?, name)
    }

    /// Parses an identifier from its canonical dotted form.
    ///
    /// The final segment is the catalog name; everything before it is the
    /// namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the string has fewer than two
    /// segments or any segment is invalid.
    pub fn parse(s: &str) -> Result<Self> {
        let mut segments: Vec<&str> = s.split(NAME_SEPARATOR).collect();
        if segments.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "invalid catalog identifier '{s}' (expected metalake{NAME_SEPARATOR}catalog)"
            )));
        }

        // Last segment is the leaf; the rest form the namespace.
        let name = segments.pop().unwrap_or_default();
        Self::new(Namespace::new(segments)?, name)
    }

    /// Returns the parent namespace.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the catalog name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the metalake name.
    #[must_use]
    pub fn metalake(&self) -> &str {
        self.namespace.metalake()
    }
}

impl fmt::Display for CatalogIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{NAME_SEPARATOR}{}", self.namespace, self.name)
    }
}

impl FromStr for CatalogIdent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_valid() {
        let ns = Namespace::of("prod-lake").expect("valid namespace");
        assert_eq!(ns.segments(), ["prod-lake"]);
        assert_eq!(ns.metalake(), "prod-lake");
        assert_eq!(ns.to_string(), "prod-lake");
    }

    #[test]
    fn namespace_rejects_empty() {
        assert!(Namespace::new(Vec::<String>::new()).is_err());
        assert!(Namespace::of("").is_err());
    }

    #[test]
    fn namespace_rejects_separator() {
        let result = Namespace::of("prod.lake");
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn namespace_rejects_overlong_segment() {
        let long = "a".repeat(129);
        assert!(Namespace::of(long).is_err());
        let max = "a".repeat(128);
        assert!(Namespace::of(max).is_ok());
    }

    #[test]
    fn ident_valid() {
        let ident = CatalogIdent::of("prod-lake", "warehouse").expect("valid ident");
        assert_eq!(ident.metalake(), "prod-lake");
        assert_eq!(ident.name(), "warehouse");
        assert_eq!(ident.to_string(), "prod-lake.warehouse");
    }

    #[test]
    fn ident_rejects_bad_leaf() {
        assert!(CatalogIdent::of("prod-lake", "").is_err());
        assert!(CatalogIdent::of("prod-lake", "ware.house").is_err());
    }

    #[test]
    fn ident_parse_roundtrip() {
        let ident = CatalogIdent::parse("prod-lake.warehouse").expect("valid");
        assert_eq!(ident.metalake(), "prod-lake");
        assert_eq!(ident.name(), "warehouse");
        assert_eq!(
            CatalogIdent::parse(&ident.to_string()).expect("reparse"),
            ident
        );
    }

    #[test]
    fn ident_parse_rejects_single_segment() {
        assert!(CatalogIdent::parse("warehouse").is_err());
        assert!(CatalogIdent::parse("").is_err());
    }

    #[test]
    fn ident_parse_rejects_empty_segments() {
        assert!(CatalogIdent::parse(".warehouse").is_err());
        assert!(CatalogIdent::parse("prod-lake.").is_err());
        assert!(CatalogIdent::parse("prod-lake..warehouse").is_err());
    }

    #[test]
    fn ident_equality_is_structural() {
        let a = CatalogIdent::of("prod-lake", "warehouse").expect("valid");
        let b = CatalogIdent::of("prod-lake", "warehouse").expect("valid");
        let c = CatalogIdent::of("prod-lake", "other").expect("valid");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut map = std::collections::HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn ident_serde_roundtrip() {
        let ident = CatalogIdent::of("prod-lake", "warehouse").expect("valid");
        let json = serde_json::to_string(&ident).expect("serialize");
        assert!(json.contains("prod-lake"));
        let parsed: CatalogIdent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, ident);
    }
}
