pub mod applicant;
pub mod error;
pub mod prediction;
pub mod schema;

pub use applicant::{ApplicantInput, CategoricalField, NumericField};
pub use error::{InputError, SchemaError};
pub use prediction::{Label, Prediction};
pub use schema::{FeatureRow, Schema};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_raw() {
        assert_eq!(Label::from_raw(1), Label::Approved);
        assert_eq!(Label::from_raw(0), Label::Rejected);
        assert_eq!(Label::from_raw(2), Label::Rejected);
        assert_eq!(Label::from_raw(-1), Label::Rejected);
    }

    #[test]
    fn prediction_serializes() {
        let prediction = Prediction::new("Ada", Label::Approved);
        let json = serde_json::to_string(&prediction).expect("serialize prediction");
        assert_eq!(json, r#"{"applicant":"Ada","label":"approved"}"#);
        let round: Prediction = serde_json::from_str(&json).expect("deserialize prediction");
        assert_eq!(round, prediction);
    }
}
