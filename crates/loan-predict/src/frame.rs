//! Conversion between feature rows and Polars tables.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use loan_common::any_to_f64;
use loan_model::FeatureRow;

use crate::error::PredictError;

/// Package one feature row as a one-row table, one `Float64` column per
/// schema feature, in schema order.
pub fn row_to_frame(row: &FeatureRow) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = row
        .iter()
        .map(|(name, value)| Series::new(name.into(), vec![value]).into_column())
        .collect();
    DataFrame::new(columns)
}

/// Read `table` into row-major feature vectors for a model.
///
/// With `names`, columns are looked up by name in that order; otherwise the
/// table's own column order is used and must have exactly `n_features`
/// columns. Nulls and non-numeric cells become `NaN` (missing).
pub fn feature_matrix(
    table: &DataFrame,
    names: Option<&[String]>,
    n_features: usize,
) -> Result<Vec<Vec<f64>>, PredictError> {
    let height = table.height();
    if height == 0 {
        return Err(PredictError::EmptyTable);
    }

    let columns: Vec<&Column> = match names {
        Some(names) => names
            .iter()
            .map(|name| {
                table
                    .column(name)
                    .map_err(|_| PredictError::MissingFeature { name: name.clone() })
            })
            .collect::<Result<_, _>>()?,
        None => {
            let columns = table.get_columns();
            if columns.len() != n_features {
                return Err(PredictError::FeatureCount {
                    expected: n_features,
                    got: columns.len(),
                });
            }
            columns.iter().collect()
        }
    };

    let mut rows = Vec::with_capacity(height);
    for idx in 0..height {
        let mut values = Vec::with_capacity(columns.len());
        for column in &columns {
            values.push(any_to_f64(column.get(idx)?).unwrap_or(f64::NAN));
        }
        rows.push(values);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use loan_model::Schema;
    use polars::prelude::DataType;

    use super::*;

    fn row() -> FeatureRow {
        let schema = Arc::new(Schema::zeroed(["B", "A", "C"]).unwrap());
        let mut row = FeatureRow::from_defaults(schema);
        row.set("A", 2.0);
        row.set("C", 3.5);
        row
    }

    #[test]
    fn frame_follows_schema_order() {
        let frame = row_to_frame(&row()).unwrap();
        assert_eq!(frame.height(), 1);
        let names: Vec<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        for column in frame.get_columns() {
            assert_eq!(column.dtype(), &DataType::Float64);
        }
    }

    #[test]
    fn matrix_by_name_reorders() {
        let frame = row_to_frame(&row()).unwrap();
        let names = vec!["C".to_string(), "A".to_string(), "B".to_string()];
        let matrix = feature_matrix(&frame, Some(&names), 3).unwrap();
        assert_eq!(matrix, vec![vec![3.5, 2.0, 0.0]]);
    }

    #[test]
    fn matrix_by_name_requires_every_column() {
        let frame = row_to_frame(&row()).unwrap();
        let names = vec!["A".to_string(), "Z".to_string()];
        let err = feature_matrix(&frame, Some(&names), 2).unwrap_err();
        assert!(matches!(err, PredictError::MissingFeature { ref name } if name == "Z"));
    }

    #[test]
    fn positional_matrix_checks_width() {
        let frame = row_to_frame(&row()).unwrap();
        assert_eq!(
            feature_matrix(&frame, None, 3).unwrap(),
            vec![vec![0.0, 2.0, 3.5]]
        );
        assert!(matches!(
            feature_matrix(&frame, None, 4),
            Err(PredictError::FeatureCount {
                expected: 4,
                got: 3
            })
        ));
    }

    #[test]
    fn nulls_become_missing() {
        let column = Series::new("A".into(), vec![None::<f64>, Some(1.0)]).into_column();
        let frame = DataFrame::new(vec![column]).unwrap();
        let matrix = feature_matrix(&frame, None, 1).unwrap();
        assert!(matrix[0][0].is_nan());
        assert_eq!(matrix[1][0], 1.0);
    }
}
