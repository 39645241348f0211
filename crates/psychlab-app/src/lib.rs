//! psychlab-app library root.
//!
//! The composition root: configuration, the local session, the dashboard
//! controller and the HTTP API that fronts them. Modules are public so that
//! integration tests can drive them without a network listener.

pub mod aws;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything under /reports needs a logged-in session.
    let reports = Router::new()
        .route(
            "/reports",
            get(routes::reports::list_history).post(routes::reports::generate),
        )
        .route("/reports/current", get(routes::reports::get_current))
        .route("/reports/reset", post(routes::reports::reset))
        .route("/reports/{id}/select", post(routes::reports::select))
        .route("/reports/{id}/print", get(routes::reports::print_view))
        .route("/reports/{id}/export/doc", get(routes::reports::export_doc))
        .route("/reports/{id}/export/docx", get(routes::reports::export_docx))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/tools", get(routes::tools::list_tools))
        .route("/session", get(routes::session::get_session))
        .route("/session/login", post(routes::session::login))
        .route("/session/signup", post(routes::session::signup))
        .route("/session/logout", post(routes::session::logout))
        .merge(reports)
        .layer(axum_mw::from_fn(middleware::access::access_log))
        .layer(cors)
        .with_state(state)
}
