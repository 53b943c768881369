use thiserror::Error;

use crate::drift::SchemaDrift;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{} form value(s) have no schema feature: {}", drift.len(), join_drift(drift))]
    SchemaDrift { drift: Vec<SchemaDrift> },
}

fn join_drift(drift: &[SchemaDrift]) -> String {
    drift
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
