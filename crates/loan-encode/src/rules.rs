//! Encoding rules from form fields to schema feature names.
//!
//! The classifier was trained on a dummy-encoded table (first category of each
//! multi-valued field dropped), so each form field maps onto the schema in one
//! of two ways:
//!
//! | Field          | Encoding  | Feature(s)                     |
//! |----------------|-----------|--------------------------------|
//! | Gender         | indicator | `Gender_Male` = "Male"         |
//! | Marital Status | indicator | `Married_Yes` = "Married"      |
//! | Education      | indicator | `Education_Not Graduate`       |
//! | Self Employed  | indicator | `Self_Employed_Yes` = "Yes"    |
//! | Credit History | indicator | `Credit_History_1.0`           |
//! | Dependents     | one-hot   | `Dependents_{value}`           |
//! | Property Area  | one-hot   | `Property_Area_{value}`        |

use loan_model::{CategoricalField, NumericField};

/// How a categorical field lands in the feature row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Set `{prefix}_{value}` to 1 when that feature exists.
    ///
    /// `baseline` is the category the training encoding dropped; selecting it
    /// legitimately sets nothing.
    OneHot {
        prefix: &'static str,
        baseline: Option<&'static str>,
    },
    /// Set `feature` to 1 when the selection equals `sentinel`, else 0.
    Indicator {
        feature: &'static str,
        sentinel: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalRule {
    pub field: CategoricalField,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRule {
    pub field: NumericField,
    pub feature: &'static str,
}

pub const CATEGORICAL_RULES: &[CategoricalRule] = &[
    CategoricalRule {
        field: CategoricalField::Dependents,
        encoding: Encoding::OneHot {
            prefix: "Dependents",
            baseline: Some("0"),
        },
    },
    CategoricalRule {
        field: CategoricalField::PropertyArea,
        encoding: Encoding::OneHot {
            prefix: "Property_Area",
            baseline: Some("Rural"),
        },
    },
    CategoricalRule {
        field: CategoricalField::Gender,
        encoding: Encoding::Indicator {
            feature: "Gender_Male",
            sentinel: "Male",
        },
    },
    CategoricalRule {
        field: CategoricalField::MaritalStatus,
        encoding: Encoding::Indicator {
            feature: "Married_Yes",
            sentinel: "Married",
        },
    },
    CategoricalRule {
        field: CategoricalField::Education,
        encoding: Encoding::Indicator {
            feature: "Education_Not Graduate",
            sentinel: "Not Graduate",
        },
    },
    CategoricalRule {
        field: CategoricalField::SelfEmployed,
        encoding: Encoding::Indicator {
            feature: "Self_Employed_Yes",
            sentinel: "Yes",
        },
    },
    CategoricalRule {
        field: CategoricalField::CreditHistory,
        encoding: Encoding::Indicator {
            feature: "Credit_History_1.0",
            sentinel: "All Debts Paid",
        },
    },
];

pub const NUMERIC_RULES: &[NumericRule] = &[
    NumericRule {
        field: NumericField::ApplicantIncome,
        feature: "ApplicantIncome",
    },
    NumericRule {
        field: NumericField::CoapplicantIncome,
        feature: "CoapplicantIncome",
    },
    NumericRule {
        field: NumericField::LoanAmount,
        feature: "LoanAmount",
    },
    NumericRule {
        field: NumericField::LoanTerm,
        feature: "Loan_Amount_Term",
    },
];

/// Feature name for a one-hot selection.
pub fn one_hot_feature(prefix: &str, value: &str) -> String {
    format!("{prefix}_{value}")
}

/// Every schema feature name the rules can write, for a given form.
///
/// One-hot features are derived from the form's choices, so a choice that the
/// schema spells differently shows up here and nowhere in the schema.
pub fn expected_features() -> Vec<String> {
    let mut features = Vec::new();
    for rule in NUMERIC_RULES {
        features.push(rule.feature.to_string());
    }
    for rule in CATEGORICAL_RULES {
        match rule.encoding {
            Encoding::Indicator { feature, .. } => features.push(feature.to_string()),
            Encoding::OneHot { prefix, baseline } => {
                for choice in rule.field.choices() {
                    if Some(*choice) != baseline {
                        features.push(one_hot_feature(prefix, choice));
                    }
                }
            }
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_form_field_has_exactly_one_rule() {
        for field in CategoricalField::ALL {
            let count = CATEGORICAL_RULES.iter().filter(|r| r.field == field).count();
            assert_eq!(count, 1, "{field:?}");
        }
        for field in NumericField::ALL {
            let count = NUMERIC_RULES.iter().filter(|r| r.field == field).count();
            assert_eq!(count, 1, "{field:?}");
        }
    }

    #[test]
    fn sentinels_and_baselines_are_form_choices() {
        for rule in CATEGORICAL_RULES {
            match rule.encoding {
                Encoding::Indicator { sentinel, .. } => assert!(rule.field.is_choice(sentinel)),
                Encoding::OneHot { baseline, .. } => {
                    if let Some(baseline) = baseline {
                        assert!(rule.field.is_choice(baseline));
                    }
                }
            }
        }
    }

    #[test]
    fn expected_features_cover_form() {
        let features = expected_features();
        assert!(features.contains(&"Dependents_3+".to_string()));
        assert!(features.contains(&"Property_Area_Semi-Urban".to_string()));
        assert!(!features.contains(&"Dependents_0".to_string()));
        assert_eq!(features.len(), 4 + 5 + 3 + 2);
    }
}
