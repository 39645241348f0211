use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::dashboard::DashboardError;
use crate::session::SessionError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    /// The model service failed. The message is already user-safe.
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::MissingField(_) => {
                ApiError::BadRequest("Please fill in at least the name and age.".to_string())
            }
            DashboardError::GenerationInProgress | DashboardError::Abandoned => {
                ApiError::Conflict(e.to_string())
            }
            DashboardError::ReportNotFound(id) => ApiError::NotFound(format!("report not found: {id}")),
            // Detail was logged at the pipeline boundary.
            DashboardError::Generation(report_error) => {
                ApiError::BadGateway(report_error.user_message().to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MissingCredentials => ApiError::BadRequest(e.to_string()),
            SessionError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<psychlab_export::error::ExportError> for ApiError {
    fn from(e: psychlab_export::error::ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
