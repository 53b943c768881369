//! Behaviour of the applicant encoder against the training schema.

use std::sync::Arc;

use proptest::prelude::{Just, Strategy, any, prop_assert, prop_assert_eq, prop_oneof, proptest};
use proptest::option;

use loan_encode::{DriftSource, EncodeMode, FeatureEncoder, encode, encode_with_report};
use loan_model::{ApplicantInput, CategoricalField, Schema};

const TRAINING_COLUMNS: &[&str] = &[
    "ApplicantIncome",
    "CoapplicantIncome",
    "LoanAmount",
    "Loan_Amount_Term",
    "Gender_Male",
    "Married_Yes",
    "Dependents_1",
    "Dependents_2",
    "Dependents_3+",
    "Education_Not Graduate",
    "Self_Employed_Yes",
    "Credit_History_1.0",
    "Property_Area_Semiurban",
    "Property_Area_Urban",
];

fn training_schema() -> Arc<Schema> {
    Arc::new(Schema::zeroed(TRAINING_COLUMNS.iter().copied()).unwrap())
}

fn sample_applicant() -> ApplicantInput {
    ApplicantInput {
        name: "Ada".to_string(),
        gender: Some("Male".to_string()),
        education: Some("Graduate".to_string()),
        self_employed: Some("No".to_string()),
        marital_status: Some("Married".to_string()),
        dependents: Some("1".to_string()),
        property_area: Some("Urban".to_string()),
        credit_history: Some("All Debts Paid".to_string()),
        applicant_income: 5000.0,
        coapplicant_income: 0.0,
        loan_amount: 1200.0,
        loan_term: 360,
    }
}

#[test]
fn end_to_end_scenario_row() {
    let row = encode(&training_schema(), &sample_applicant());

    assert_eq!(row.get("Gender_Male"), Some(1.0));
    assert_eq!(row.get("Married_Yes"), Some(1.0));
    assert_eq!(row.get("Education_Not Graduate"), Some(0.0));
    assert_eq!(row.get("Self_Employed_Yes"), Some(0.0));
    assert_eq!(row.get("Credit_History_1.0"), Some(1.0));
    assert_eq!(row.get("Dependents_1"), Some(1.0));
    assert_eq!(row.get("Property_Area_Urban"), Some(1.0));
    assert_eq!(row.get("ApplicantIncome"), Some(5000.0));
    assert_eq!(row.get("CoapplicantIncome"), Some(0.0));
    assert_eq!(row.get("LoanAmount"), Some(1200.0));
    assert_eq!(row.get("Loan_Amount_Term"), Some(360.0));

    insta::assert_snapshot!(row.to_string(), @r"
    ApplicantIncome=5000
    CoapplicantIncome=0
    LoanAmount=1200
    Loan_Amount_Term=360
    Gender_Male=1
    Married_Yes=1
    Dependents_1=1
    Dependents_2=0
    Dependents_3+=0
    Education_Not Graduate=0
    Self_Employed_Yes=0
    Credit_History_1.0=1
    Property_Area_Semiurban=0
    Property_Area_Urban=1
    ");
}

#[test]
fn unset_applicant_equals_schema_defaults() {
    let schema = training_schema();
    let row = encode(&schema, &ApplicantInput::default());
    assert_eq!(row.values(), schema.defaults());
    assert_eq!(row.changed().count(), 0);
}

#[test]
fn dependents_three_plus_sets_only_its_column() {
    let input = ApplicantInput {
        dependents: Some("3+".to_string()),
        ..ApplicantInput::default()
    };
    let row = encode(&training_schema(), &input);
    assert_eq!(row.get("Dependents_3+"), Some(1.0));
    assert_eq!(row.get("Dependents_1"), Some(0.0));
    assert_eq!(row.get("Dependents_2"), Some(0.0));
}

#[test]
fn gender_indicator() {
    let schema = training_schema();
    for (gender, expected) in [(Some("Male"), 1.0), (Some("Female"), 0.0), (None, 0.0)] {
        let input = ApplicantInput {
            gender: gender.map(str::to_string),
            ..ApplicantInput::default()
        };
        assert_eq!(encode(&schema, &input).get("Gender_Male"), Some(expected));
    }
}

#[test]
fn form_spelling_of_semiurban_is_reported() {
    let input = ApplicantInput {
        property_area: Some("Semi-Urban".to_string()),
        ..ApplicantInput::default()
    };
    let encoded = encode_with_report(&training_schema(), &input);

    assert_eq!(encoded.row.get("Property_Area_Semiurban"), Some(0.0));
    assert_eq!(encoded.row.get("Property_Area_Urban"), Some(0.0));
    assert_eq!(encoded.drift.len(), 1);
    assert_eq!(
        encoded.drift[0].source,
        DriftSource::Categorical(CategoricalField::PropertyArea)
    );
    insta::assert_snapshot!(
        encoded.drift[0].to_string(),
        @"Property Area: selection 'Semi-Urban' has no schema feature 'Property_Area_Semi-Urban'"
    );
}

#[test]
fn baseline_categories_are_silent() {
    let input = ApplicantInput {
        dependents: Some("0".to_string()),
        property_area: Some("Rural".to_string()),
        ..ApplicantInput::default()
    };
    let encoded = encode_with_report(&training_schema(), &input);
    assert!(!encoded.has_drift());
    assert_eq!(encoded.row.changed().count(), 0);
}

#[test]
fn strict_encoder_passes_clean_input() {
    let encoder = FeatureEncoder::new(EncodeMode::Strict);
    let encoded = encoder.encode(&training_schema(), &sample_applicant()).unwrap();
    assert!(!encoded.has_drift());
}

#[test]
fn strict_encoder_rejects_form_drift() {
    let input = ApplicantInput {
        property_area: Some("Semi-Urban".to_string()),
        ..sample_applicant()
    };
    let err = FeatureEncoder::strict()
        .encode(&training_schema(), &input)
        .unwrap_err();
    assert!(err.to_string().contains("Property_Area_Semi-Urban"));
}

#[test]
fn empty_selection_counts_as_unset() {
    let schema = training_schema();
    let input = ApplicantInput {
        dependents: Some(String::new()),
        property_area: Some(String::new()),
        ..sample_applicant()
    };
    let unset = ApplicantInput {
        dependents: None,
        property_area: None,
        ..sample_applicant()
    };

    let encoded = encode_with_report(&schema, &input);
    assert!(!encoded.has_drift());
    assert_eq!(encoded.row, encode(&schema, &unset));
    assert!(FeatureEncoder::new(EncodeMode::Strict).encode(&schema, &input).is_ok());
}

fn selection(choices: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    let known = proptest::sample::select(choices).prop_map(str::to_string);
    option::of(prop_oneof![known, "[A-Za-z0-9+ -]{0,12}"])
}

fn applicant() -> impl Strategy<Value = ApplicantInput> {
    (
        (
            selection(CategoricalField::Gender.choices()),
            selection(CategoricalField::Education.choices()),
            selection(CategoricalField::SelfEmployed.choices()),
            selection(CategoricalField::MaritalStatus.choices()),
            selection(CategoricalField::Dependents.choices()),
            selection(CategoricalField::PropertyArea.choices()),
            selection(CategoricalField::CreditHistory.choices()),
        ),
        (0.0..1.0e6f64, 0.0..1.0e6f64, 0.0..1.0e6f64, any::<u32>()),
        prop_oneof![Just(String::new()), "[A-Za-z ]{1,16}"],
    )
        .prop_map(
            |(
                (gender, education, self_employed, marital_status, dependents, property_area, credit_history),
                (applicant_income, coapplicant_income, loan_amount, loan_term),
                name,
            )| ApplicantInput {
                name,
                gender,
                education,
                self_employed,
                marital_status,
                dependents,
                property_area,
                credit_history,
                applicant_income,
                coapplicant_income,
                loan_amount,
                loan_term,
            },
        )
}

proptest! {
    #[test]
    fn row_has_exactly_the_schema_keys(input in applicant()) {
        let schema = training_schema();
        let row = encode(&schema, &input);
        prop_assert_eq!(row.names(), schema.names());
        prop_assert!(row.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn encoding_is_idempotent(input in applicant()) {
        let schema = training_schema();
        let first = encode(&schema, &input);
        let second = encode(&schema, &input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_dependents_touch_nothing_else(value in "[a-z]{1,8}", input in applicant()) {
        let schema = training_schema();
        let base = ApplicantInput { dependents: None, ..input };
        let with_unknown = ApplicantInput { dependents: Some(value), ..base.clone() };
        prop_assert_eq!(encode(&schema, &base), encode(&schema, &with_unknown));
    }

    #[test]
    fn unknown_property_area_touches_nothing_else(value in "[a-z]{1,8}", input in applicant()) {
        let schema = training_schema();
        let base = ApplicantInput { property_area: None, ..input };
        let with_unknown = ApplicantInput { property_area: Some(value), ..base.clone() };
        prop_assert_eq!(encode(&schema, &base), encode(&schema, &with_unknown));
    }

    #[test]
    fn one_hot_sets_at_most_one_dependents_column(input in applicant()) {
        let row = encode(&training_schema(), &input);
        let set = ["Dependents_1", "Dependents_2", "Dependents_3+"]
            .iter()
            .filter(|name| row.get(name) == Some(1.0))
            .count();
        prop_assert!(set <= 1);
    }
}
