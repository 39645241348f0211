use psychlab_core::models::report::LabReport;

/// Download name for an exported report: `{patient}_{tool}_Report.{ext}`.
pub fn export_filename(report: &LabReport, extension: &str) -> String {
    let mut patient = sanitize_component(&report.patient.name);
    if patient.is_empty() {
        patient = "Patient".to_string();
    }
    format!(
        "{patient}_{}_Report.{extension}",
        sanitize_component(report.tool.label())
    )
}

/// Keep ASCII alphanumerics, replace every other run of characters with a
/// single underscore, and trim underscores from both ends.
pub fn sanitize_component(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut prev_sep = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_sep = false;
        } else if !prev_sep {
            result.push('_');
            prev_sep = true;
        }
    }
    result.trim_matches('_').to_string()
}
