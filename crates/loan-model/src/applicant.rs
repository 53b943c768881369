//! Raw applicant input as collected by the application form.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// One applicant's raw form values.
///
/// Categorical selections stay as the labels shown on the form; `None` means
/// the control was left unselected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantInput {
    pub name: String,
    pub gender: Option<String>,
    pub education: Option<String>,
    pub self_employed: Option<String>,
    pub marital_status: Option<String>,
    pub dependents: Option<String>,
    pub property_area: Option<String>,
    pub credit_history: Option<String>,
    /// Monthly income in USD.
    pub applicant_income: f64,
    /// Monthly income in USD.
    pub coapplicant_income: f64,
    /// Requested amount in USD.
    pub loan_amount: f64,
    /// Term in days.
    pub loan_term: u32,
}

impl ApplicantInput {
    /// Check the form's numeric minimums.
    pub fn validate(&self) -> Result<(), InputError> {
        for field in NumericField::ALL {
            if field == NumericField::LoanTerm {
                continue;
            }
            let value = field.value(self);
            if !value.is_finite() {
                return Err(InputError::NotFinite {
                    field: field.label(),
                });
            }
            if value < 0.0 {
                return Err(InputError::Negative {
                    field: field.label(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::Education => &self.education,
            CategoricalField::SelfEmployed => &self.self_employed,
            CategoricalField::MaritalStatus => &self.marital_status,
            CategoricalField::Dependents => &self.dependents,
            CategoricalField::PropertyArea => &self.property_area,
            CategoricalField::CreditHistory => &self.credit_history,
        };
        value.as_deref()
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        field.value(self)
    }
}

/// Selection controls on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Gender,
    Education,
    SelfEmployed,
    MaritalStatus,
    Dependents,
    PropertyArea,
    CreditHistory,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 7] = [
        CategoricalField::Gender,
        CategoricalField::Education,
        CategoricalField::SelfEmployed,
        CategoricalField::MaritalStatus,
        CategoricalField::Dependents,
        CategoricalField::PropertyArea,
        CategoricalField::CreditHistory,
    ];

    /// Label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::Education => "Education",
            CategoricalField::SelfEmployed => "Self Employed?",
            CategoricalField::MaritalStatus => "Marital Status",
            CategoricalField::Dependents => "Number of Dependents",
            CategoricalField::PropertyArea => "Property Area",
            CategoricalField::CreditHistory => "Credit History",
        }
    }

    /// Options offered by the form, in display order.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            CategoricalField::Gender => &["Male", "Female"],
            CategoricalField::Education => &["Graduate", "Not Graduate"],
            CategoricalField::SelfEmployed => &["No", "Yes"],
            CategoricalField::MaritalStatus => &["Single", "Married"],
            CategoricalField::Dependents => &["0", "1", "2", "3+"],
            CategoricalField::PropertyArea => &["Urban", "Semi-Urban", "Rural"],
            CategoricalField::CreditHistory => &["All Debts Paid", "Not Paid"],
        }
    }

    pub fn is_choice(self, value: &str) -> bool {
        self.choices().contains(&value)
    }
}

/// Numeric inputs on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    ApplicantIncome,
    CoapplicantIncome,
    LoanAmount,
    LoanTerm,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::ApplicantIncome,
        NumericField::CoapplicantIncome,
        NumericField::LoanAmount,
        NumericField::LoanTerm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::ApplicantIncome => "Applicant Income (USD/month)",
            NumericField::CoapplicantIncome => "Co-applicant Income (USD/month)",
            NumericField::LoanAmount => "Loan Amount (USD)",
            NumericField::LoanTerm => "Loan Term (days)",
        }
    }

    pub fn value(self, input: &ApplicantInput) -> f64 {
        match self {
            NumericField::ApplicantIncome => input.applicant_income,
            NumericField::CoapplicantIncome => input.coapplicant_income,
            NumericField::LoanAmount => input.loan_amount,
            NumericField::LoanTerm => f64::from(input.loan_term),
        }
    }

    /// Whether the form restricts this field to whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(self, NumericField::LoanTerm)
    }
}
