//! Polars AnyValue utility functions.
//!
//! Feature tables handed to a classifier are expected to be `Float64`, but
//! callers may build them with integer or boolean columns. These helpers
//! coerce any such cell to `f64`.

use polars::prelude::AnyValue;

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
///
/// Handles integer types, floating-point types, booleans and string parsing.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use loan_common::any_to_f64;
///
/// assert_eq!(any_to_f64(AnyValue::Int32(3)), Some(3.0));
/// assert_eq!(any_to_f64(AnyValue::Boolean(true)), Some(1.0));
/// assert_eq!(any_to_f64(AnyValue::Null), None);
/// ```
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
