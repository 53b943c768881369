//! Prediction service against the shipped artifacts.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use loan_encode::encode;
use loan_model::{ApplicantInput, Label, Prediction};
use loan_predict::{Classifier, ModelLoadError, PredictionError, PredictionService, TreeEnsemble};
use loan_schema::SchemaRegistry;

fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

fn shipped_registry() -> SchemaRegistry {
    SchemaRegistry::new(artifacts_dir().join("columns_set.json"))
}

fn shipped_service() -> PredictionService {
    PredictionService::new(artifacts_dir().join("model.json"))
}

fn applicant() -> ApplicantInput {
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

fn decide(input: &ApplicantInput) -> Label {
    let schema = shipped_registry().load_schema().unwrap();
    let row = encode(&schema, input);
    shipped_service().predict(&row).unwrap()
}

#[test]
fn paid_credit_with_modest_loan_is_approved() {
    let label = decide(&applicant());
    assert_eq!(label, Label::Approved);
    assert_eq!(
        Prediction::new("Ada", label).message(),
        "Dear Ada, your loan is approved! 🎉"
    );
}

#[test]
fn unpaid_credit_is_rejected() {
    let mut input = applicant();
    input.credit_history = Some("Not Paid".to_string());
    assert_eq!(decide(&input), Label::Rejected);
}

#[test]
fn untouched_form_is_rejected() {
    assert_eq!(decide(&ApplicantInput::default()), Label::Rejected);
}

#[test]
fn low_income_with_paid_credit_is_approved() {
    let mut input = applicant();
    input.applicant_income = 1000.0;
    assert_eq!(decide(&input), Label::Approved);
}

#[test]
fn large_loan_on_low_income_is_rejected() {
    let mut input = applicant();
    input.applicant_income = 1000.0;
    input.loan_amount = 9000.0;
    assert_eq!(decide(&input), Label::Rejected);
}

#[test]
fn loan_just_under_threshold_rounds_onto_it() {
    // 4999.9999 is 5000.0 in single precision, so the large-loan branch applies.
    let mut input = applicant();
    input.applicant_income = 1000.0;
    input.loan_amount = 4999.9999;
    assert_eq!(decide(&input), Label::Rejected);

    input.loan_amount = 4999.0;
    assert_eq!(decide(&input), Label::Approved);
}

#[test]
fn model_is_loaded_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::copy(artifacts_dir().join("model.json"), &path).unwrap();

    let service = PredictionService::new(&path);
    assert!(!service.is_loaded());
    let first = service.load_model().unwrap();
    assert!(service.is_loaded());

    fs::remove_file(&path).unwrap();
    let second = service.load_model().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let schema = shipped_registry().load_schema().unwrap();
    let row = encode(&schema, &applicant());
    assert_eq!(service.predict(&row).unwrap(), Label::Approved);
}

#[test]
fn concurrent_first_loads_share_one_model() {
    let service = Arc::new(shipped_service());
    let start = Arc::new(std::sync::Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let start = Arc::clone(&start);
            std::thread::spawn(move || {
                start.wait();
                service.load_model().unwrap()
            })
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let cached = service.load_model().unwrap();
    for model in &models {
        assert!(Arc::ptr_eq(model, &cached));
    }
}

#[test]
fn missing_model_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = PredictionService::new(dir.path().join("model.json"));
    let schema = shipped_registry().load_schema().unwrap();
    let row = encode(&schema, &applicant());

    let err = service.predict(&row).unwrap_err();
    assert!(matches!(err, PredictionError::Load(ModelLoadError::Io { .. })));
    assert!(err.to_string().contains("model.json"));
}

#[test]
fn corrupt_model_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, "not json").unwrap();
    let err = PredictionService::new(&path).load_model().unwrap_err();
    assert!(matches!(err, ModelLoadError::Json { .. }));
}

#[test]
fn logistic_artifact_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{
            "format": "logistic",
            "feature_names": ["Credit_History_1.0", "LoanAmount"],
            "coefficients": [3.0, -0.001],
            "intercept": -1.0
        }"#,
    )
    .unwrap();

    let service = PredictionService::new(&path);
    let schema = shipped_registry().load_schema().unwrap();

    let approved = encode(&schema, &applicant());
    assert_eq!(service.predict(&approved).unwrap(), Label::Approved);

    let mut input = applicant();
    input.credit_history = Some("Not Paid".to_string());
    let rejected = encode(&schema, &input);
    assert_eq!(service.predict(&rejected).unwrap(), Label::Rejected);

    let alignment = service.check_alignment(&schema).unwrap();
    assert!(alignment.missing_in_schema.is_empty());
    assert_eq!(alignment.missing_in_model.len(), schema.len() - 2);
}

#[test]
fn shipped_artifacts_are_aligned() {
    let schema = shipped_registry().load_schema().unwrap();
    let service = shipped_service();
    let alignment = service.check_alignment(&schema).unwrap();
    assert!(alignment.is_aligned(), "{alignment:?}");

    let (model, info) = service.inspect().unwrap();
    assert_eq!(info.kind, "gbtree");
    assert_eq!(info.n_features, schema.len());
    assert_eq!(model.feature_names().map(<[String]>::len), Some(schema.len()));
}

#[test]
fn shipped_ensemble_margins() {
    let contents = fs::read_to_string(artifacts_dir().join("model.json")).unwrap();
    let model = TreeEnsemble::from_json(&contents, &artifacts_dir().join("model.json")).unwrap();
    assert_eq!(model.n_trees(), 2);

    let schema = shipped_registry().load_schema().unwrap();
    let row = encode(&schema, &applicant());
    assert!((model.margin(row.values()) - 1.1).abs() < 1e-6);

    let empty = encode(&schema, &ApplicantInput::default());
    assert!((model.margin(empty.values()) + 1.5).abs() < 1e-6);
}
