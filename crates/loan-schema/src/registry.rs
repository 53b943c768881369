#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use tracing::{debug, info};

use loan_common::hash::short_fingerprint;
use loan_common::paths::default_schema_path;
use loan_model::Schema;

use crate::artifact::parse_schema;
use crate::error::ConfigLoadError;

/// Loads the feature schema once and serves the cached copy afterwards.
///
/// The artifact is read on the first successful [`load_schema`] call. Threads
/// racing that call wait for a single read. Later calls, from any thread,
/// return the same `Arc` without touching the file system. A failed load is
/// not cached, but callers treat it as fatal.
///
/// [`load_schema`]: SchemaRegistry::load_schema
#[derive(Debug)]
pub struct SchemaRegistry {
    path: PathBuf,
    cached: OnceLock<Arc<Schema>>,
    init: Mutex<()>,
}

/// Facts about a schema load, reported by [`SchemaRegistry::load_with_summary`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub feature_count: usize,
    pub fingerprint: String,
}

impl SchemaRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Registry for `columns_set.json` in the configured artifact directory.
    pub fn from_default_location() -> Self {
        Self::new(default_schema_path(None))
    }

    /// Registry pre-filled with an already built schema.
    pub fn with_schema(schema: Arc<Schema>) -> Self {
        let cached = OnceLock::new();
        let _ = cached.set(schema);
        Self {
            path: PathBuf::new(),
            cached,
            init: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Return the schema, reading the artifact on first use.
    pub fn load_schema(&self) -> Result<Arc<Schema>, ConfigLoadError> {
        if let Some(schema) = self.cached.get() {
            return Ok(Arc::clone(schema));
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(schema) = self.cached.get() {
            return Ok(Arc::clone(schema));
        }
        let (schema, _) = self.read_artifact()?;
        Ok(Arc::clone(self.cached.get_or_init(|| Arc::new(schema))))
    }

    /// Read the artifact from disk, bypassing the cache, and summarise it.
    ///
    /// Used by diagnostics that need the fingerprint of what is on disk now.
    pub fn load_with_summary(&self) -> Result<(Schema, LoadSummary), ConfigLoadError> {
        self.read_artifact()
    }

    fn read_artifact(&self) -> Result<(Schema, LoadSummary), ConfigLoadError> {
        let start = Instant::now();
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| ConfigLoadError::io(&self.path, e))?;
        let schema = parse_schema(&contents, &self.path)?;
        let summary = LoadSummary {
            path: self.path.clone(),
            feature_count: schema.len(),
            fingerprint: short_fingerprint(contents.as_bytes()),
        };
        info!(
            path = %self.path.display(),
            feature_count = summary.feature_count,
            fingerprint = %summary.fingerprint,
            duration_ms = start.elapsed().as_millis(),
            "schema loaded"
        );
        debug!(features = ?schema.names(), "schema columns");
        Ok((schema, summary))
    }
}
