//! Shared utilities for the loan inference crates.
//!
//! - **paths**: artifact directory resolution
//! - **hash**: SHA-256 fingerprints of loaded artifacts
//! - **polars**: Polars `AnyValue` conversions used when reading feature tables

pub mod hash;
pub mod paths;
pub mod polars;

pub use hash::sha256_hex;
pub use paths::{ARTIFACTS_ENV_VAR, artifacts_root, default_model_path, default_schema_path};
pub use polars::any_to_f64;
