use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary decision returned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Approved,
    Rejected,
}

impl Label {
    /// Interpret a raw classifier output: `1` approves, anything else rejects.
    pub fn from_raw(raw: i64) -> Self {
        if raw == 1 {
            Label::Approved
        } else {
            Label::Rejected
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, Label::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Approved => "approved",
            Label::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision paired with the applicant it was made for. Display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub applicant: String,
    pub label: Label,
}

impl Prediction {
    pub fn new(applicant: impl Into<String>, label: Label) -> Self {
        Self {
            applicant: applicant.into(),
            label,
        }
    }

    /// The fixed-format message shown to the applicant.
    pub fn message(&self) -> String {
        match self.label {
            Label::Approved => format!("Dear {}, your loan is approved! 🎉", self.applicant),
            Label::Rejected => format!("Sorry {}, your loan is rejected. 😔", self.applicant),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
