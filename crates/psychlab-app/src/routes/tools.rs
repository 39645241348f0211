use axum::Json;
use serde::Serialize;

use psychlab_core::models::assessment_tool::AssessmentTool;

#[derive(Serialize)]
pub struct ToolSummary {
    id: AssessmentTool,
    name: &'static str,
}

pub async fn list_tools() -> Json<Vec<ToolSummary>> {
    let tools = AssessmentTool::all()
        .iter()
        .map(|tool| ToolSummary {
            id: *tool,
            name: tool.full_name(),
        })
        .collect();
    Json(tools)
}
