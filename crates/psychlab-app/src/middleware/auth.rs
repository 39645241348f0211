use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Session gate for dashboard routes.
///
/// Passes only when a login marker is present and inserts the `Session`
/// into request extensions. Nothing is verified beyond presence.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = state
        .session
        .lock()
        .await
        .current()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("not logged in".to_string()))?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
