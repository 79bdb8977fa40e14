use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Identifier of an image collection in the remote catalog,
/// e.g. "MODIS/006/MOD13Q1". Recognized lazily by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn as_str(self: &Self) -> &str {
        &self.0
    }
}

impl From<&str> for CollectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The named set of collections a run downloads, read once from the
/// manifest and immutable afterward.
///
/// Short names double as output file prefixes (`<name><date>.tif`), so no
/// two entries may collide after that concatenation. Iteration order is
/// alphabetical by short name, which keeps runs reproducible.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CollectionSet {
    entries: BTreeMap<String, CollectionId>,
}

impl CollectionSet {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(set)
    }

    pub fn iter(self: &Self) -> impl Iterator<Item = (&str, &CollectionId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), id))
    }

    pub fn len(self: &Self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CollectionId)> for CollectionSet {
    fn from_iter<T: IntoIterator<Item = (String, CollectionId)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_manifest() {
        let path = "/tmp/geedaily_test_collections.json";
        fs::write(
            path,
            r#"{ "ndvi": "MODIS/006/MOD13Q1", "s2": "COPERNICUS/S2_SR" }"#,
        )
        .unwrap();
        let set = CollectionSet::read(path).unwrap();
        assert_eq!(set.len(), 2);

        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries[0], ("ndvi", &CollectionId::from("MODIS/006/MOD13Q1")));
        assert_eq!(entries[1], ("s2", &CollectionId::from("COPERNICUS/S2_SR")));
    }

    #[test]
    fn test_iteration_is_alphabetical() {
        let path = "/tmp/geedaily_test_collections_order.json";
        fs::write(path, r#"{ "zulu": "Z/1", "alpha": "A/1", "mike": "M/1" }"#).unwrap();
        let set = CollectionSet::read(path).unwrap();
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn test_missing_manifest_is_io_error() {
        let err = CollectionSet::read("/tmp/geedaily_no_such_manifest.json").unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Io { .. }));
    }

    #[test]
    fn test_non_object_manifest_is_parse_error() {
        let path = "/tmp/geedaily_test_collections_bad.json";
        fs::write(path, r#"["not", "a", "mapping"]"#).unwrap();
        let err = CollectionSet::read(path).unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::Parse { .. }));
    }
}
