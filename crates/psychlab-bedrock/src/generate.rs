use serde::{Deserialize, Serialize};
use tracing::{error, info};

use psychlab_core::models::assessment_tool::AssessmentTool;
use psychlab_core::models::patient::PatientProfile;
use psychlab_core::models::report::ReportResult;

use crate::client::{ModelRequest, ReportModel};
use crate::decode::decode_response;
use crate::error::ReportError;
use crate::prompt::build_prompt;
use crate::schema::response_schema;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Per-call generation controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_budget_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            thinking_budget_tokens: None,
        }
    }
}

/// Generate a report for one patient with one model call.
///
/// No retries, no caching. Every failure is logged here with its full
/// detail and returned as an opaque [`ReportError`] kind.
pub async fn generate_report(
    model: &dyn ReportModel,
    settings: &GenerationSettings,
    patient: &PatientProfile,
    tool: AssessmentTool,
) -> Result<ReportResult, ReportError> {
    let request = ModelRequest {
        model_id: settings.model_id.clone(),
        prompt: build_prompt(patient, tool),
        schema: response_schema(),
        thinking_budget_tokens: settings.thinking_budget_tokens,
    };

    info!(model = %request.model_id, tool = %tool, "starting report generation");

    let body = model.complete(&request).await.map_err(|e| {
        error!(model = %request.model_id, tool = %tool, error = %e, "model service call failed");
        ReportError::TransportFailure
    })?;

    let result = decode_response(body.as_deref()).map_err(|e| {
        error!(
            model = %request.model_id,
            tool = %tool,
            error = %e,
            body = body.as_deref().unwrap_or_default(),
            "model reply rejected"
        );
        ReportError::from(e)
    })?;

    info!(
        model = %request.model_id,
        tool = %tool,
        report_len = result.full_report.len(),
        "report generation complete"
    );

    Ok(result)
}
