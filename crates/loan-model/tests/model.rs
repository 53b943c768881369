use loan_model::{CategoricalField, Label, Prediction};

#[test]
fn approved_message_includes_name() {
    let prediction = Prediction::new("Grace", Label::Approved);
    insta::assert_snapshot!(prediction.message(), @"Dear Grace, your loan is approved! 🎉");
}

#[test]
fn rejected_message_includes_name() {
    let prediction = Prediction::new("Grace", Label::Rejected);
    insta::assert_snapshot!(prediction.to_string(), @"Sorry Grace, your loan is rejected. 😔");
}

#[test]
fn form_choices_match_application_form() {
    assert_eq!(CategoricalField::Dependents.choices(), &["0", "1", "2", "3+"]);
    assert_eq!(
        CategoricalField::PropertyArea.choices(),
        &["Urban", "Semi-Urban", "Rural"]
    );
    assert!(CategoricalField::CreditHistory.is_choice("All Debts Paid"));
    assert!(!CategoricalField::Gender.is_choice("male"));
}
