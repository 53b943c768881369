#![deny(unsafe_code)]

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failure to load the classifier artifact.
///
/// Fatal at first use: there is no retry and no fallback model.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported model artifact {path}: {message}")]
    UnsupportedFormat { path: PathBuf, message: String },

    #[error("invalid model artifact {path}: {message}")]
    InvalidModel { path: PathBuf, message: String },
}

impl ModelLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure while scoring a feature table.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("feature table is missing column '{name}' required by the model")]
    MissingFeature { name: String },

    #[error("model expects {expected} features, table has {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("feature table has no rows")]
    EmptyTable,

    #[error("model returned no prediction")]
    NoPrediction,

    #[error("feature table error: {0}")]
    Frame(#[from] PolarsError),
}

/// Failure of [`PredictionService::predict`](crate::PredictionService::predict).
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Load(#[from] ModelLoadError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}
