//! Prediction service for single-applicant loan decisions.
//!
//! - **artifact**: model file format detection and loading
//! - **classifier**: the [`Classifier`] capability and one-row scoring
//! - **frame**: feature rows as Polars tables
//! - **gbtree**: XGBoost JSON tree ensembles
//! - **logistic**: linear logistic models
//! - **service**: [`PredictionService`], the cached model owner

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod frame;
pub mod gbtree;
pub mod logistic;
pub mod service;

pub use artifact::{ArtifactFormat, ArtifactInfo, load_classifier};
pub use classifier::{Classifier, predict};
pub use error::{ModelLoadError, PredictError, PredictionError};
pub use gbtree::{Objective, TreeEnsemble};
pub use logistic::{LogisticModel, LogisticParams};
pub use service::{Alignment, PredictionService, alignment};
