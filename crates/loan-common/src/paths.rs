//! Artifact directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the artifact directory.
pub const ARTIFACTS_ENV_VAR: &str = "LOAN_ARTIFACTS_DIR";

/// File name of the feature schema inside the artifact directory.
pub const SCHEMA_FILE_NAME: &str = "columns_set.json";

/// File name of the classifier inside the artifact directory.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Get the artifact root directory.
///
/// Resolution order:
/// 1. `LOAN_ARTIFACTS_DIR` environment variable
/// 2. `artifacts/` directory relative to workspace root
pub fn artifacts_root() -> PathBuf {
    if let Ok(root) = std::env::var(ARTIFACTS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

/// Schema artifact path under `root`, or under [`artifacts_root`] when `None`.
pub fn default_schema_path(root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.join(SCHEMA_FILE_NAME),
        None => artifacts_root().join(SCHEMA_FILE_NAME),
    }
}

/// Model artifact path under `root`, or under [`artifacts_root`] when `None`.
pub fn default_model_path(root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) => root.join(MODEL_FILE_NAME),
        None => artifacts_root().join(MODEL_FILE_NAME),
    }
}
