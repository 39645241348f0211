//! The canonical report prompt.
//!
//! The section order written here is what `psychlab-export` renders
//! positionally. Keep it in step with `REPORT_SECTIONS` and with
//! `schema::response_schema`.

use psychlab_core::models::assessment_tool::AssessmentTool;
use psychlab_core::models::patient::PatientProfile;
use psychlab_core::models::report::{REPORT_SECTIONS, report_title};

use crate::converse::REPORT_TOOL_NAME;

pub const NO_TEST_SCORES: &str = "Observation only";
pub const NO_REFERRAL_REASON: &str = "General assessment";
pub const NO_CLINICAL_OBSERVATIONS: &str = "No specific observations provided";

/// Build the instruction text for one generation. Pure and deterministic.
pub fn build_prompt(patient: &PatientProfile, tool: AssessmentTool) -> String {
    let scores = or_fallback(&patient.test_scores, NO_TEST_SCORES);
    let referral = or_fallback(&patient.referral_reason, NO_REFERRAL_REASON);
    let observations = or_fallback(&patient.clinical_observations, NO_CLINICAL_OBSERVATIONS);

    let mut prompt = String::from(
        "You are a senior clinical psychologist acting as the evaluating clinician. \
         Generate a professional psychological assessment laboratory report for the following.\n\n",
    );

    prompt.push_str("PATIENT DETAILS:\n");
    prompt.push_str(&format!("Name: {}\n", patient.name));
    prompt.push_str(&format!("Age: {}\n", patient.age));
    prompt.push_str(&format!("Gender: {}\n\n", patient.gender));

    prompt.push_str("ASSESSMENT TOOL:\n");
    prompt.push_str(&format!("{} ({})\n\n", tool.label(), tool.full_name()));

    prompt.push_str("DATA POINTS (USE THIS ORDER FOR THE REPORT BODY):\n");
    prompt.push_str(&format!("1. Test Scores/Raw Data: {scores}\n"));
    prompt.push_str(&format!("2. Referral Reason: {referral}\n"));
    prompt.push_str(&format!("3. Clinical Observations: {observations}\n\n"));

    prompt.push_str(&format!(
        "Where raw test scores are provided, interpret them against the standard normative \
         benchmarks for {} and state the classification each score falls into.\n\n",
        tool.label()
    ));

    prompt.push_str("Provide:\n");
    prompt.push_str("1. \"summary\": a SHORT SUMMARY of 2-3 sentences for a quick overview.\n");
    prompt.push_str(
        "2. \"fullReport\": a DETAILED FULL REPORT in Markdown. Use '# ' for the title, \
         '## ' for sections and '### ' for sub-sections.\n",
    );
    prompt.push_str("   You MUST order the sections exactly as follows:\n");
    prompt.push_str(&format!("   - # {}\n", report_title(tool)));
    for section in REPORT_SECTIONS {
        prompt.push_str(&format!("   - ## {section}\n"));
    }
    prompt.push('\n');

    prompt.push_str(
        "Respond with a single valid JSON object with exactly two string keys: \
         \"summary\" and \"fullReport\". Do not add any text outside the JSON object.\n",
    );
    prompt.push_str(&format!(
        "Record that object by calling the `{REPORT_TOOL_NAME}` tool.\n"
    ));

    prompt
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}
