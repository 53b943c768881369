//! Mismatches between the form and the feature schema.

use std::fmt;

use serde::Serialize;

use loan_model::{CategoricalField, NumericField};

/// Which input produced a feature that the schema does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftSource {
    Categorical(CategoricalField),
    Numeric(NumericField),
}

impl DriftSource {
    pub fn label(self) -> &'static str {
        match self {
            DriftSource::Categorical(field) => field.label(),
            DriftSource::Numeric(field) => field.label(),
        }
    }
}

/// A value the encoder could not place because its feature is not in the schema.
///
/// The value is dropped and the row keeps the feature defaults, so the
/// prediction silently ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDrift {
    pub source: DriftSource,
    /// The feature name the encoder looked for.
    pub feature: String,
    /// The selected value, for one-hot fields.
    pub value: Option<String>,
}

impl fmt::Display for SchemaDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(
                f,
                "{}: selection '{}' has no schema feature '{}'",
                self.source.label(),
                value,
                self.feature
            ),
            None => write!(
                f,
                "{}: schema has no feature '{}'",
                self.source.label(),
                self.feature
            ),
        }
    }
}
