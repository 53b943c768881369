//! Model artifact loading and format detection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use loan_common::hash::short_fingerprint;

use crate::classifier::Classifier;
use crate::error::ModelLoadError;
use crate::gbtree::TreeEnsemble;
use crate::logistic::LogisticModel;

/// Recognised model artifact layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// XGBoost JSON model (`{"learner": ...}`).
    XgboostJson,
    /// Logistic parameters (`{"format": "logistic", ...}`).
    Logistic,
}

/// Facts about a loaded model artifact.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub kind: &'static str,
    pub n_features: usize,
    pub fingerprint: String,
}

/// Identify the layout of a parsed artifact.
pub fn detect_format(document: &Value) -> Option<ArtifactFormat> {
    if document.get("learner").is_some() {
        return Some(ArtifactFormat::XgboostJson);
    }
    match document.get("format").and_then(Value::as_str) {
        Some("logistic") => Some(ArtifactFormat::Logistic),
        _ => None,
    }
}

/// Parse artifact contents read from `path` into a classifier.
pub fn parse_classifier(
    contents: &str,
    path: &Path,
) -> Result<(Arc<dyn Classifier>, ArtifactFormat), ModelLoadError> {
    let document: Value = serde_json::from_str(contents).map_err(|source| ModelLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let format = detect_format(&document).ok_or_else(|| ModelLoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        message: "expected an XGBoost JSON model or {\"format\": \"logistic\"}".to_string(),
    })?;
    let classifier: Arc<dyn Classifier> = match format {
        ArtifactFormat::XgboostJson => Arc::new(TreeEnsemble::from_json(contents, path)?),
        ArtifactFormat::Logistic => Arc::new(LogisticModel::from_json(contents, path)?),
    };
    Ok((classifier, format))
}

/// Read and parse the artifact at `path`.
pub fn load_classifier(path: &Path) -> Result<(Arc<dyn Classifier>, ArtifactInfo), ModelLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ModelLoadError::io(path, e))?;
    let (classifier, format) = parse_classifier(&contents, path)?;
    let info = ArtifactInfo {
        path: path.to_path_buf(),
        format,
        kind: classifier.kind(),
        n_features: classifier.n_features(),
        fingerprint: short_fingerprint(contents.as_bytes()),
    };
    Ok((classifier, info))
}
