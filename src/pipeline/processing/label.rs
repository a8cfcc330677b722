use serde::{Deserialize, Serialize};

use crate::pipeline::processing::impute::ImputedFields;

/// One weak indicator of a fake posting. Any single signal is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    MissingCompanyProfile,
    MissingRequirements,
    MissingEducation,
    ReportedFraudulent,
}

/// The fixed rule table, evaluated in this order.
pub const SIGNALS: [Signal; 4] = [
    Signal::MissingCompanyProfile,
    Signal::MissingRequirements,
    Signal::MissingEducation,
    Signal::ReportedFraudulent,
];

impl Signal {
    pub fn fires(&self, fields: &ImputedFields, fraudulent: Option<u8>) -> bool {
        match self {
            Signal::MissingCompanyProfile => fields.company_profile.is_none(),
            Signal::MissingRequirements => fields.requirements.is_none(),
            Signal::MissingEducation => fields.required_education.is_none(),
            Signal::ReportedFraudulent => fraudulent == Some(1),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Signal::MissingCompanyProfile => "company profile is missing",
            Signal::MissingRequirements => "requirements are missing",
            Signal::MissingEducation => "required education is missing",
            Signal::ReportedFraudulent => "posting is reported fraudulent",
        }
    }
}

/// Which signals fired for one posting and the resulting label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAssessment {
    pub signals: Vec<Signal>,
    pub likely_fake: u8,
}

impl LabelAssessment {
    pub fn is_likely_fake(&self) -> bool {
        self.likely_fake == 1
    }
}

/// Evaluate every signal against already-normalized fields.
pub fn assess(fields: &ImputedFields, fraudulent: Option<u8>) -> LabelAssessment {
    let signals: Vec<Signal> = SIGNALS
        .iter()
        .copied()
        .filter(|s| s.fires(fields, fraudulent))
        .collect();
    let likely_fake = u8::from(!signals.is_empty());
    LabelAssessment { signals, likely_fake }
}
