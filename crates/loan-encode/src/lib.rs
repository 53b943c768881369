//! Feature encoding for single-applicant loan predictions.
//!
//! - **rules**: which form field writes which schema feature
//! - **encoder**: builds a [`loan_model::FeatureRow`] from an [`loan_model::ApplicantInput`]
//! - **drift**: values that found no schema feature

pub mod drift;
pub mod encoder;
pub mod error;
pub mod rules;

pub use drift::{DriftSource, SchemaDrift};
pub use encoder::{EncodeMode, EncodedRow, FeatureEncoder, encode, encode_with_report};
pub use error::EncodeError;
