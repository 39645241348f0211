use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named psychometric instrument. Purely a label: it is inserted into the
/// prompt and shown on the report, and carries no scoring behavior.
///
/// The serialized form is the label, e.g. `"ADHD-RS"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentTool {
    #[default]
    #[serde(rename = "MISIC")]
    Misic,
    #[serde(rename = "CAT")]
    Cat,
    #[serde(rename = "VSMS")]
    Vsms,
    #[serde(rename = "SPM")]
    Spm,
    #[serde(rename = "CPM")]
    Cpm,
    #[serde(rename = "NIMHANS INDEX FOR LEARNING DISABILITY")]
    NimhansLd,
    #[serde(rename = "ISAA")]
    Isaa,
    #[serde(rename = "CONNER")]
    Conner,
    #[serde(rename = "VANDERBILT")]
    Vanderbilt,
    #[serde(rename = "ADHD-RS")]
    AdhdRs,
}

impl AssessmentTool {
    /// All tools, in the order they are offered on the intake form.
    pub fn all() -> &'static [AssessmentTool] {
        &[
            AssessmentTool::Misic,
            AssessmentTool::Cat,
            AssessmentTool::Vsms,
            AssessmentTool::Spm,
            AssessmentTool::Cpm,
            AssessmentTool::NimhansLd,
            AssessmentTool::Isaa,
            AssessmentTool::Conner,
            AssessmentTool::Vanderbilt,
            AssessmentTool::AdhdRs,
        ]
    }

    /// The identifier used in prompts, filenames and on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentTool::Misic => "MISIC",
            AssessmentTool::Cat => "CAT",
            AssessmentTool::Vsms => "VSMS",
            AssessmentTool::Spm => "SPM",
            AssessmentTool::Cpm => "CPM",
            AssessmentTool::NimhansLd => "NIMHANS INDEX FOR LEARNING DISABILITY",
            AssessmentTool::Isaa => "ISAA",
            AssessmentTool::Conner => "CONNER",
            AssessmentTool::Vanderbilt => "VANDERBILT",
            AssessmentTool::AdhdRs => "ADHD-RS",
        }
    }

    /// Human-readable instrument name.
    pub fn full_name(&self) -> &'static str {
        match self {
            AssessmentTool::Misic => "Malin's Intelligence Scale for Indian Children",
            AssessmentTool::Cat => "Children's Apperception Test",
            AssessmentTool::Vsms => "Vineland Social Maturity Scale",
            AssessmentTool::Spm => "Standard Progressive Matrices",
            AssessmentTool::Cpm => "Coloured Progressive Matrices",
            AssessmentTool::NimhansLd => "NIMHANS Index for Specific Learning Disabilities",
            AssessmentTool::Isaa => "Indian Scale for Assessment of Autism",
            AssessmentTool::Conner => "Conners Rating Scales",
            AssessmentTool::Vanderbilt => "Vanderbilt ADHD Diagnostic Rating Scale",
            AssessmentTool::AdhdRs => "ADHD Rating Scale",
        }
    }
}

impl fmt::Display for AssessmentTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AssessmentTool {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssessmentTool::all()
            .iter()
            .copied()
            .find(|t| t.label() == s)
            .ok_or_else(|| CoreError::UnknownTool(s.to_string()))
    }
}
