use crate::error::ConfigError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// The area of interest constraining every spatial query of a run.
///
/// Holds the raw GeoJSON geometry of the first feature in the input file.
/// The geometry is passed through to the catalog service unmodified; no
/// schema validation happens on this side.
#[derive(Debug, Clone, PartialEq)]
pub struct Aoi {
    geometry: Value,
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Value,
}

impl Aoi {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fc: FeatureCollection =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Only the first feature matters; an empty collection is a config
        // mistake, not an index fault.
        let feature = fc
            .features
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::EmptyFeatureCollection(path.to_path_buf()))?;

        Ok(Self { geometry: feature.geometry })
    }

    pub fn geometry(self: &Self) -> &Value {
        &self.geometry
    }

    #[cfg(test)]
    pub(crate) fn from_geometry(geometry: Value) -> Self {
        Self { geometry }
    }
}
