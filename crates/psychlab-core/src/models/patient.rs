use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Structured input describing the individual being assessed.
///
/// Every field is opaque text: ages like `"12 years"` and free-form score
/// dumps are passed through to the prompt untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub referral_reason: String,
    #[serde(default)]
    pub clinical_observations: String,
    #[serde(default)]
    pub test_scores: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::all()
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownGender(s.to_string()))
    }
}
