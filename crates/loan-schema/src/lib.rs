#![deny(unsafe_code)]

pub mod artifact;
pub mod error;
pub mod registry;

pub use crate::artifact::{SCHEMA_KEY, parse_schema};
pub use crate::error::ConfigLoadError;
pub use crate::registry::{LoadSummary, SchemaRegistry};
