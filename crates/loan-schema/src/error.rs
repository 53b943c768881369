#![deny(unsafe_code)]

use std::path::PathBuf;

use loan_model::SchemaError;

/// Failure to load the feature schema artifact.
///
/// Schema loading is a startup dependency: none of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read schema artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema artifact {path} has no '{key}' entry")]
    MissingKey { path: PathBuf, key: String },

    #[error("schema artifact {path}: '{key}' must be an object or an array")]
    InvalidColumns { path: PathBuf, key: String },

    #[error("schema artifact {path}: default for feature '{name}' is not a number")]
    InvalidDefault { path: PathBuf, name: String },

    #[error("schema artifact {path}: entry {index} of '{key}' is not a feature name")]
    InvalidEntry {
        path: PathBuf,
        key: String,
        index: usize,
    },

    #[error("invalid schema in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl ConfigLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
