//! Classifier capability and single-row prediction.

use std::fmt;

use polars::prelude::DataFrame;

use loan_model::{FeatureRow, Label};

use crate::error::PredictError;
use crate::frame::row_to_frame;

/// A loaded, pre-trained binary classifier.
///
/// Implementations are pure once constructed: the same table always yields
/// the same labels.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Short name of the model family, for logs and diagnostics.
    fn kind(&self) -> &'static str;

    /// Input columns the model was trained on, when the artifact records them.
    ///
    /// Models with names resolve table columns by name; models without them
    /// read columns by position.
    fn feature_names(&self) -> Option<&[String]>;

    /// Number of input features the model reads.
    fn n_features(&self) -> usize;

    /// Score every row of `table`, returning one raw label per row.
    fn predict(&self, table: &DataFrame) -> Result<Vec<i64>, PredictError>;
}

/// Score one feature row.
///
/// The row is packaged as a one-row table in schema column order and the
/// first (only) raw label is interpreted: `1` approves, anything else rejects.
pub fn predict(model: &dyn Classifier, row: &FeatureRow) -> Result<Label, PredictError> {
    let table = row_to_frame(row)?;
    let labels = model.predict(&table)?;
    let raw = labels.first().copied().ok_or(PredictError::NoPrediction)?;
    Ok(Label::from_raw(raw))
}
