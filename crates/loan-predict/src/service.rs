#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use tracing::{debug, info};

use loan_common::paths::default_model_path;
use loan_model::{FeatureRow, Label, Schema};

use crate::artifact::{ArtifactInfo, load_classifier};
use crate::classifier::{Classifier, predict};
use crate::error::{ModelLoadError, PredictionError};

/// Owns the classifier for the life of the process.
///
/// The artifact is loaded once, on first use, even when several threads ask
/// at the same time. The same model serves every later request. Loading is
/// not retried and there is no fallback model.
#[derive(Debug)]
pub struct PredictionService {
    model_path: PathBuf,
    model: OnceLock<Arc<dyn Classifier>>,
    init: Mutex<()>,
}

/// How a model's input columns line up with a feature schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Alignment {
    /// Schema features the model never reads.
    pub missing_in_model: Vec<String>,
    /// Model features the schema cannot supply.
    pub missing_in_schema: Vec<String>,
    /// Whether shared names appear in the same order.
    pub order_matches: bool,
    /// `(model, schema)` widths, when the model has no names to compare.
    pub width_mismatch: Option<(usize, usize)>,
}

impl Alignment {
    pub fn is_aligned(&self) -> bool {
        self.missing_in_model.is_empty()
            && self.missing_in_schema.is_empty()
            && self.order_matches
            && self.width_mismatch.is_none()
    }
}

impl PredictionService {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            model: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Service for `model.json` in the configured artifact directory.
    pub fn from_default_location() -> Self {
        Self::new(default_model_path(None))
    }

    /// Service backed by an already constructed classifier.
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        let model = OnceLock::new();
        let _ = model.set(classifier);
        Self {
            model_path: PathBuf::new(),
            model,
            init: Mutex::new(()),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// Return the classifier, loading the artifact on first use.
    pub fn load_model(&self) -> Result<Arc<dyn Classifier>, ModelLoadError> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(model));
        }
        let (classifier, _) = self.read_artifact()?;
        Ok(Arc::clone(self.model.get_or_init(|| classifier)))
    }

    /// Load the artifact from disk without touching the cache.
    pub fn inspect(&self) -> Result<(Arc<dyn Classifier>, ArtifactInfo), ModelLoadError> {
        self.read_artifact()
    }

    /// Score one feature row with the cached model.
    pub fn predict(&self, row: &FeatureRow) -> Result<Label, PredictionError> {
        let model = self.load_model()?;
        let label = predict(model.as_ref(), row)?;
        debug!(model = model.kind(), label = %label, "row scored");
        Ok(label)
    }

    /// Compare the cached model's input columns with `schema`.
    pub fn check_alignment(&self, schema: &Schema) -> Result<Alignment, ModelLoadError> {
        let model = self.load_model()?;
        Ok(alignment(model.as_ref(), schema))
    }

    fn read_artifact(&self) -> Result<(Arc<dyn Classifier>, ArtifactInfo), ModelLoadError> {
        let start = Instant::now();
        let (classifier, info) = load_classifier(&self.model_path)?;
        info!(
            path = %self.model_path.display(),
            kind = info.kind,
            feature_count = info.n_features,
            fingerprint = %info.fingerprint,
            duration_ms = start.elapsed().as_millis(),
            "model loaded"
        );
        Ok((classifier, info))
    }
}

/// Compare a model's input columns with `schema`.
pub fn alignment(model: &dyn Classifier, schema: &Schema) -> Alignment {
    let Some(names) = model.feature_names() else {
        let width_mismatch =
            (model.n_features() != schema.len()).then(|| (model.n_features(), schema.len()));
        return Alignment {
            order_matches: true,
            width_mismatch,
            ..Alignment::default()
        };
    };

    let missing_in_model = schema
        .names()
        .iter()
        .filter(|name| !names.contains(name))
        .cloned()
        .collect();
    let missing_in_schema: Vec<String> = names
        .iter()
        .filter(|name| !schema.contains(name))
        .cloned()
        .collect();
    let shared_schema: Vec<&String> = schema
        .names()
        .iter()
        .filter(|name| names.contains(name))
        .collect();
    let shared_model: Vec<&String> = names.iter().filter(|name| schema.contains(name)).collect();

    Alignment {
        missing_in_model,
        missing_in_schema,
        order_matches: shared_schema == shared_model,
        width_mismatch: None,
    }
}
