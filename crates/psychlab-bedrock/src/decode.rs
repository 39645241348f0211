use serde::Deserialize;

use psychlab_core::models::report::ReportResult;

use crate::error::ResponseError;

/// Exact wire shape of a model reply. Both keys are required and must be
/// strings; anything else fails deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReport {
    summary: String,
    full_report: String,
}

/// Strictly decode a model reply body.
///
/// - `None` or whitespace-only text is [`ResponseError::Empty`].
/// - Text that is not a JSON object with string `summary` and `fullReport`
///   is [`ResponseError::Malformed`].
/// - A blank `fullReport` is [`ResponseError::BlankReport`].
///
/// Unknown extra keys are ignored.
pub fn decode_response(body: Option<&str>) -> Result<ReportResult, ResponseError> {
    let text = match body {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ResponseError::Empty),
    };

    let wire: WireReport = serde_json::from_str(text)?;

    if wire.full_report.trim().is_empty() {
        return Err(ResponseError::BlankReport);
    }

    Ok(ReportResult {
        summary: wire.summary,
        full_report: wire.full_report,
    })
}
