//! Schema artifact parsing.
//!
//! The artifact is a JSON document whose `data_columns` entry lists the
//! classifier's input columns in training order, either as an object of
//! `name -> default` or as a plain array of names (defaults `0.0`):
//!
//! ```json
//! { "data_columns": { "ApplicantIncome": 0, "Gender_Male": 0 } }
//! { "data_columns": ["ApplicantIncome", "Gender_Male"] }
//! ```

use std::path::Path;

use serde_json::Value;

use loan_model::Schema;

use crate::error::ConfigLoadError;

/// Top-level key holding the column mapping.
pub const SCHEMA_KEY: &str = "data_columns";

/// Parse schema artifact contents read from `path`.
pub fn parse_schema(contents: &str, path: &Path) -> Result<Schema, ConfigLoadError> {
    let document: Value = serde_json::from_str(contents).map_err(|source| ConfigLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let columns = document
        .get(SCHEMA_KEY)
        .ok_or_else(|| ConfigLoadError::MissingKey {
            path: path.to_path_buf(),
            key: SCHEMA_KEY.to_string(),
        })?;

    let entries = match columns {
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (name, default) in map {
                let default = default
                    .as_f64()
                    .ok_or_else(|| ConfigLoadError::InvalidDefault {
                        path: path.to_path_buf(),
                        name: name.clone(),
                    })?;
                entries.push((name.clone(), default));
            }
            entries
        }
        Value::Array(items) => {
            let mut entries = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let name = item.as_str().ok_or_else(|| ConfigLoadError::InvalidEntry {
                    path: path.to_path_buf(),
                    key: SCHEMA_KEY.to_string(),
                    index,
                })?;
                entries.push((name.to_string(), 0.0));
            }
            entries
        }
        _ => {
            return Err(ConfigLoadError::InvalidColumns {
                path: path.to_path_buf(),
                key: SCHEMA_KEY.to_string(),
            });
        }
    };

    Schema::new(entries).map_err(|source| ConfigLoadError::Schema {
        path: path.to_path_buf(),
        source,
    })
}
