use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use psychlab_core::models::assessment_tool::AssessmentTool;
use psychlab_core::models::patient::PatientProfile;
use psychlab_core::models::report::LabReport;
use psychlab_export::filename::export_filename;
use psychlab_export::{DOC_CONTENT_TYPE, DOCX_CONTENT_TYPE, docx, html};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub patient: PatientProfile,
    #[serde(default)]
    pub tool: AssessmentTool,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<LabReport>, ApiError> {
    let report = state
        .dashboard
        .generate(state.model.as_ref(), &state.settings, req.patient, req.tool)
        .await?;
    Ok(Json(report))
}

pub async fn list_history(State(state): State<AppState>) -> Json<Vec<LabReport>> {
    Json(state.dashboard.history())
}

pub async fn get_current(State(state): State<AppState>) -> Result<Json<LabReport>, ApiError> {
    state
        .dashboard
        .current()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no active report".to_string()))
}

pub async fn reset(State(state): State<AppState>) -> Json<()> {
    state.dashboard.reset();
    Json(())
}

pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LabReport>, ApiError> {
    Ok(Json(state.dashboard.select(id)?))
}

pub async fn print_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let report = find_report(&state, id)?;
    Ok(Html(html::render_print_view(&report, &state.styles)?))
}

/// The report as an HTML word-processor document download.
pub async fn export_doc(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let report = find_report(&state, id)?;
    let body = html::render_word_document(&report, &state.styles)?;
    Ok(attachment(DOC_CONTENT_TYPE, &export_filename(&report, "doc"), body.into_bytes()))
}

pub async fn export_docx(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let report = find_report(&state, id)?;
    let bytes = docx::generate_docx(&report, &state.styles)?;
    Ok(attachment(DOCX_CONTENT_TYPE, &export_filename(&report, "docx"), bytes))
}

fn find_report(state: &AppState, id: Uuid) -> Result<LabReport, ApiError> {
    state
        .dashboard
        .find(id)
        .ok_or_else(|| ApiError::NotFound(format!("report not found: {id}")))
}

fn attachment(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
