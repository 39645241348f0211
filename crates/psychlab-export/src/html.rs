use tera::{Context, Tera};
use tracing::debug;

use psychlab_core::models::report::LabReport;

use crate::error::ExportError;
use crate::render::parse_report;
use crate::styles::DocumentStyles;

const REPORT_TEMPLATE_NAME: &str = "report.html";
const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

/// Standalone HTML page for the browser print dialog. Opens the dialog on load.
pub fn render_print_view(report: &LabReport, styles: &DocumentStyles) -> Result<String, ExportError> {
    render(report, styles, false)
}

/// The report wrapped in a fixed, self-styled HTML document that word
/// processors open as a `.doc` file.
pub fn render_word_document(
    report: &LabReport,
    styles: &DocumentStyles,
) -> Result<String, ExportError> {
    render(report, styles, true)
}

fn render(
    report: &LabReport,
    styles: &DocumentStyles,
    word_document: bool,
) -> Result<String, ExportError> {
    // The `.html` name turns on Tera's autoescaping for every field.
    let mut tera = Tera::default();
    tera.add_raw_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let mut context = Context::new();
    context.insert("word_document", &word_document);
    context.insert("styles", styles);
    context.insert("report_id", &report.id.to_string());
    context.insert("patient", &report.patient);
    context.insert("tool", report.tool.label());
    context.insert("tool_name", report.tool.full_name());
    context.insert("date", &report.date().to_string());
    context.insert("summary", &report.summary);
    context.insert("blocks", &parse_report(&report.full_report));

    let rendered = tera.render(REPORT_TEMPLATE_NAME, &context)?;
    debug!(report_id = %report.id, word_document, len = rendered.len(), "rendered report html");
    Ok(rendered)
}
