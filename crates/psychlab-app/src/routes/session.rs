use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use psychlab_core::models::session::Session;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn get_session(State(state): State<AppState>) -> Result<Json<Session>, ApiError> {
    state
        .session
        .lock()
        .await
        .current()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("not logged in".to_string()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.session.lock().await.login(&req.email, &req.password)?;
    Ok(Json(session))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .session
        .lock()
        .await
        .signup(&req.name, &req.email, &req.password)?;
    Ok(Json(session))
}

/// Ends the session and drops the dashboard's reports with it.
pub async fn logout(State(state): State<AppState>) -> Result<Json<()>, ApiError> {
    state.session.lock().await.logout()?;
    state.dashboard.clear();
    Ok(Json(()))
}
