//! Linear logistic classifier stored as plain JSON parameters.
//!
//! ```json
//! {
//!   "format": "logistic",
//!   "feature_names": ["ApplicantIncome", "Credit_History_1.0"],
//!   "coefficients": [0.0004, 2.1],
//!   "intercept": -1.5,
//!   "threshold": 0.5
//! }
//! ```

use std::path::Path;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{ModelLoadError, PredictError};
use crate::frame::feature_matrix;

/// Serializable parameters of a fitted logistic model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// A fitted logistic regression: approves when `sigmoid(w·x + b) >= threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    feature_names: Option<Vec<String>>,
    coefficients: Vec<f64>,
    intercept: f64,
    threshold: f64,
}

impl LogisticModel {
    pub fn from_params(params: LogisticParams, path: &Path) -> Result<Self, ModelLoadError> {
        let invalid = |message: String| ModelLoadError::InvalidModel {
            path: path.to_path_buf(),
            message,
        };
        if params.coefficients.is_empty() {
            return Err(invalid("model has no coefficients".to_string()));
        }
        if !params.feature_names.is_empty()
            && params.feature_names.len() != params.coefficients.len()
        {
            return Err(invalid(format!(
                "{} feature names for {} coefficients",
                params.feature_names.len(),
                params.coefficients.len()
            )));
        }
        if !params.coefficients.iter().all(|w| w.is_finite()) || !params.intercept.is_finite() {
            return Err(invalid("parameters must be finite".to_string()));
        }
        if !(params.threshold > 0.0 && params.threshold < 1.0) {
            return Err(invalid(format!(
                "threshold {} must lie in (0, 1)",
                params.threshold
            )));
        }
        Ok(Self {
            feature_names: if params.feature_names.is_empty() {
                None
            } else {
                Some(params.feature_names)
            },
            coefficients: params.coefficients,
            intercept: params.intercept,
            threshold: params.threshold,
        })
    }

    pub fn from_json(contents: &str, path: &Path) -> Result<Self, ModelLoadError> {
        let params: LogisticParams =
            serde_json::from_str(contents).map_err(|source| ModelLoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_params(params, path)
    }

    /// Probability of approval for one feature vector. Missing values count as 0.
    pub fn probability(&self, features: &[f64]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| if x.is_nan() { 0.0 } else { w * x })
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticModel {
    fn kind(&self) -> &'static str {
        "logistic"
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, table: &DataFrame) -> Result<Vec<i64>, PredictError> {
        let rows = feature_matrix(table, self.feature_names(), self.n_features())?;
        Ok(rows
            .iter()
            .map(|row| i64::from(self.probability(row) >= self.threshold))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LogisticParams {
        LogisticParams {
            feature_names: vec!["a".to_string(), "b".to_string()],
            coefficients: vec![1.0, -1.0],
            intercept: 0.0,
            threshold: 0.5,
        }
    }

    #[test]
    fn probability_is_sigmoid_of_linear_term() {
        let model = LogisticModel::from_params(params(), Path::new("m.json")).unwrap();
        assert!((model.probability(&[1.0, 1.0]) - 0.5).abs() < 1e-12);
        assert!(model.probability(&[3.0, 0.0]) > 0.9);
        assert!(model.probability(&[0.0, 3.0]) < 0.1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let model = LogisticModel::from_params(params(), Path::new("m.json")).unwrap();
        let p = model.probability(&[2.0, 2.0]);
        assert_eq!(p, 0.5);
        assert!(p >= model.threshold);
    }

    #[test]
    fn name_count_must_match_coefficients() {
        let mut bad = params();
        bad.feature_names.pop();
        assert!(matches!(
            LogisticModel::from_params(bad, Path::new("m.json")),
            Err(ModelLoadError::InvalidModel { .. })
        ));
    }

    #[test]
    fn threshold_defaults_to_half() {
        let json = r#"{"format": "logistic", "coefficients": [1.0], "intercept": 0.0}"#;
        let model = LogisticModel::from_json(json, Path::new("m.json")).unwrap();
        assert_eq!(model.threshold, 0.5);
        assert!(model.feature_names().is_none());
    }
}
