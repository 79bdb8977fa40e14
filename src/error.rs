use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("AOI file contains no features: {0}")]
    EmptyFeatureCollection(PathBuf),

    #[error("'{id}' is not a recognized image collection (manifest entry '{name}')")]
    UnknownCollection { name: String, id: String },

    #[error("Environment variable {0} is not set")]
    MissingToken(&'static str),
}
