//! Applicant-to-feature-row encoding.
//!
//! Every row starts as a copy of the schema defaults, so features the form
//! never touched are still present. The rules in [`crate::rules`] then
//! overwrite the features derived from the applicant's selections and numbers.

use std::sync::Arc;

use tracing::{debug, warn};

use loan_model::{ApplicantInput, FeatureRow, Schema};

use crate::drift::{DriftSource, SchemaDrift};
use crate::error::EncodeError;
use crate::rules::{CATEGORICAL_RULES, Encoding, NUMERIC_RULES, one_hot_feature};

/// What to do with selections that have no schema feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodeMode {
    /// Drop them and log a warning.
    #[default]
    Lenient,
    /// Refuse to encode the applicant.
    Strict,
}

/// A feature row plus whatever the encoder had to drop to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    pub row: FeatureRow,
    pub drift: Vec<SchemaDrift>,
}

impl EncodedRow {
    pub fn has_drift(&self) -> bool {
        !self.drift.is_empty()
    }
}

/// Encode one applicant onto `schema`.
///
/// Selections whose feature is missing from the schema are dropped; see
/// [`encode_with_report`] to find out which.
pub fn encode(schema: &Arc<Schema>, input: &ApplicantInput) -> FeatureRow {
    encode_with_report(schema, input).row
}

/// Encode one applicant and report every value that found no schema feature.
pub fn encode_with_report(schema: &Arc<Schema>, input: &ApplicantInput) -> EncodedRow {
    let mut row = FeatureRow::from_defaults(Arc::clone(schema));
    let mut drift = Vec::new();

    for rule in CATEGORICAL_RULES {
        // An empty selection is an untouched widget.
        let selected = input.categorical(rule.field).filter(|v| !v.is_empty());
        match rule.encoding {
            Encoding::OneHot { prefix, baseline } => {
                let Some(value) = selected else {
                    continue;
                };
                let feature = one_hot_feature(prefix, value);
                if row.set(&feature, 1.0) {
                    continue;
                }
                if baseline == Some(value) {
                    debug!(field = ?rule.field, value, "baseline category selected");
                    continue;
                }
                drift.push(SchemaDrift {
                    source: DriftSource::Categorical(rule.field),
                    feature,
                    value: Some(value.to_string()),
                });
            }
            Encoding::Indicator { feature, sentinel } => {
                let flag = if selected == Some(sentinel) { 1.0 } else { 0.0 };
                if !row.set(feature, flag) {
                    drift.push(SchemaDrift {
                        source: DriftSource::Categorical(rule.field),
                        feature: feature.to_string(),
                        value: None,
                    });
                }
            }
        }
    }

    for rule in NUMERIC_RULES {
        if !row.set(rule.feature, input.numeric(rule.field)) {
            drift.push(SchemaDrift {
                source: DriftSource::Numeric(rule.field),
                feature: rule.feature.to_string(),
                value: None,
            });
        }
    }

    for item in &drift {
        warn!(
            field = item.source.label(),
            feature = %item.feature,
            value = item.value.as_deref().unwrap_or(""),
            "value dropped: feature not in schema"
        );
    }
    debug!(
        feature_count = row.len(),
        changed = row.changed().count(),
        dropped = drift.len(),
        "applicant encoded"
    );

    EncodedRow { row, drift }
}

/// Encoder with a configurable drift policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder {
    mode: EncodeMode,
}

impl FeatureEncoder {
    pub fn new(mode: EncodeMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(EncodeMode::Strict)
    }

    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    pub fn encode(
        &self,
        schema: &Arc<Schema>,
        input: &ApplicantInput,
    ) -> Result<EncodedRow, EncodeError> {
        let encoded = encode_with_report(schema, input);
        if self.mode == EncodeMode::Strict && encoded.has_drift() {
            return Err(EncodeError::SchemaDrift {
                drift: encoded.drift,
            });
        }
        Ok(encoded)
    }
}
