use std::str::FromStr;

use psychlab_core::models::assessment_tool::AssessmentTool;
use psychlab_core::models::patient::{Gender, PatientProfile};
use psychlab_core::models::report::{LabReport, ReportResult, report_title};
use psychlab_core::models::session::Session;

fn jane() -> PatientProfile {
    PatientProfile {
        name: "Jane Doe".to_string(),
        age: "10".to_string(),
        gender: Gender::Female,
        referral_reason: String::new(),
        clinical_observations: String::new(),
        test_scores: String::new(),
    }
}

#[test]
fn tool_labels_round_trip_through_from_str() {
    for tool in AssessmentTool::all() {
        assert_eq!(AssessmentTool::from_str(tool.label()).unwrap(), *tool);
    }
    assert!(AssessmentTool::from_str("WISC-V").is_err());
}

#[test]
fn tool_serializes_as_label() {
    let json = serde_json::to_string(&AssessmentTool::NimhansLd).unwrap();
    assert_eq!(json, "\"NIMHANS INDEX FOR LEARNING DISABILITY\"");

    let tool: AssessmentTool = serde_json::from_str("\"ADHD-RS\"").unwrap();
    assert_eq!(tool, AssessmentTool::AdhdRs);
}

#[test]
fn gender_parses_case_insensitively() {
    assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
    assert_eq!(Gender::from_str(" Other ").unwrap(), Gender::Other);
    assert!(Gender::from_str("unknown").is_err());
}

#[test]
fn patient_uses_camel_case_and_defaults_optional_fields() {
    let patient: PatientProfile =
        serde_json::from_str(r#"{"name":"Sam","age":"7 years","gender":"Other"}"#).unwrap();
    assert_eq!(patient.name, "Sam");
    assert_eq!(patient.gender, Gender::Other);
    assert!(patient.test_scores.is_empty());

    let value = serde_json::to_value(jane()).unwrap();
    assert!(value.get("referralReason").is_some());
    assert!(value.get("clinicalObservations").is_some());
    assert!(value.get("testScores").is_some());
}

#[test]
fn lab_report_snapshots_input() {
    let patient = jane();
    let report = LabReport::new(
        patient.clone(),
        AssessmentTool::Isaa,
        ReportResult {
            summary: "Short.".to_string(),
            full_report: "# ISAA Assessment Report".to_string(),
        },
    );

    assert_eq!(report.patient, patient);
    assert_eq!(report.tool, AssessmentTool::Isaa);
    assert_eq!(report.summary, "Short.");

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["fullReport"], "# ISAA Assessment Report");
    assert_eq!(value["tool"], "ISAA");
}

#[test]
fn report_ids_are_unique() {
    let result = ReportResult {
        summary: "s".to_string(),
        full_report: "r".to_string(),
    };
    let a = LabReport::new(jane(), AssessmentTool::Cat, result.clone());
    let b = LabReport::new(jane(), AssessmentTool::Cat, result);
    assert_ne!(a.id, b.id);
}

#[test]
fn report_title_uses_label() {
    assert_eq!(report_title(AssessmentTool::Isaa), "ISAA Assessment Report");
}

#[test]
fn session_wire_shape() {
    let session = Session::authenticated("dr@clinic.com");
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "email": "dr@clinic.com", "isAuthenticated": true })
    );
}

#[test]
fn report_date_is_local() {
    let report = LabReport::new(
        jane(),
        AssessmentTool::Cat,
        ReportResult {
            summary: "s".to_string(),
            full_report: "# CAT Assessment Report".to_string(),
        },
    );

    let local = report
        .created_at
        .to_zoned(jiff::tz::TimeZone::system())
        .date();
    assert_eq!(report.date(), local);
}
