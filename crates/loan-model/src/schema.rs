//! Feature schema and the fixed-shape feature row derived from it.
//!
//! A [`Schema`] is the ordered set of feature names a trained classifier
//! expects, each with a default value. A [`FeatureRow`] shares the schema's
//! key set: values can be overwritten by name, but keys can never be added or
//! removed, so a row always lines up with the columns the model was trained on.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::SchemaError;

/// Ordered feature names with their default values.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    defaults: Vec<f64>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from `(name, default)` pairs in model column order.
    pub fn new<I, S>(entries: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut defaults = Vec::new();
        let mut index = HashMap::new();
        for (name, default) in entries {
            let name = name.into();
            if !default.is_finite() {
                return Err(SchemaError::NonFiniteDefault {
                    name,
                    value: default,
                });
            }
            if index.contains_key(&name) {
                return Err(SchemaError::DuplicateFeature { name });
            }
            index.insert(name.clone(), names.len());
            names.push(name);
            defaults.push(default);
        }
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self {
            names,
            defaults,
            index,
        })
    }

    /// Build a schema where every feature defaults to `0.0`.
    pub fn zeroed<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|name| (name, 0.0)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column position of `name` in model order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn default_of(&self, name: &str) -> Option<f64> {
        self.position(name).map(|idx| self.defaults[idx])
    }

    /// Feature names in model column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn defaults(&self) -> &[f64] {
        &self.defaults
    }

    /// Iterate `(name, default)` pairs in model column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.defaults.iter().copied())
    }
}

/// One applicant's feature values, keyed by the schema's feature names.
///
/// Rows start as a copy of the schema defaults. The shared schema itself is
/// never written through a row.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    schema: Arc<Schema>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// A row holding a copy of every schema default.
    pub fn from_defaults(schema: Arc<Schema>) -> Self {
        let values = schema.defaults.clone();
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema.position(name).map(|idx| self.values[idx])
    }

    /// Overwrite the value of an existing feature.
    ///
    /// Returns `false` and leaves the row untouched when `name` is not part
    /// of the schema.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.schema.position(name) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Values in model column order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        self.schema.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.schema
            .names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Features whose value differs from the schema default.
    pub fn changed(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.iter()
            .zip(self.schema.defaults.iter())
            .filter(|((_, value), default)| value.to_bits() != default.to_bits())
            .map(|(entry, _)| entry)
    }
}

impl PartialEq for FeatureRow {
    fn eq(&self, other: &Self) -> bool {
        self.schema.names == other.schema.names
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl fmt::Display for FeatureRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for FeatureRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
