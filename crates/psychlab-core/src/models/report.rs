use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment_tool::AssessmentTool;
use super::patient::PatientProfile;

/// Second-level headings of the long-form report, in the order the model is
/// instructed to emit them. The renderer relies on this order.
pub const REPORT_SECTIONS: [&str; 5] = [
    "Test Results & Quantitative Findings",
    "Referral Context & Background",
    "Behavioral & Clinical Observations",
    "Clinical Interpretation",
    "Recommendations",
];

/// Title line of the long-form report for a given tool.
pub fn report_title(tool: AssessmentTool) -> String {
    format!("{} Assessment Report", tool.label())
}

/// The structured reply of the model service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    /// Two or three sentence overview.
    pub summary: String,
    /// Line-oriented Markdown with `#`/`##`/`###` headings.
    pub full_report: String,
}

/// One successful generation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub id: Uuid,
    pub patient: PatientProfile,
    pub tool: AssessmentTool,
    pub created_at: jiff::Timestamp,
    pub summary: String,
    pub full_report: String,
}

impl LabReport {
    /// Combine a snapshot of the submitted input with the model's reply.
    pub fn new(patient: PatientProfile, tool: AssessmentTool, result: ReportResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient,
            tool,
            created_at: jiff::Timestamp::now(),
            summary: result.summary,
            full_report: result.full_report,
        }
    }

    /// Calendar date of generation in the machine's local time zone.
    pub fn date(&self) -> jiff::civil::Date {
        self.created_at.to_zoned(jiff::tz::TimeZone::system()).date()
    }
}
