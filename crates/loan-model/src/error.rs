use thiserror::Error;

/// Errors raised while building a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("schema has no features")]
    Empty,
    #[error("duplicate feature in schema: {name}")]
    DuplicateFeature { name: String },
    #[error("feature {name} has a non-finite default ({value})")]
    NonFiniteDefault { name: String, value: f64 },
}

/// Errors raised when an applicant record fails the form's minimums.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
