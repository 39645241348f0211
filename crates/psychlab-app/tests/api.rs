mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use psychlab_app::router;
use psychlab_app::session::{MemorySessionStore, SessionManager};
use psychlab_app::state::AppState;
use psychlab_bedrock::generate::GenerationSettings;
use psychlab_export::styles::DocumentStyles;

use common::{FakeModel, ISAA_REPLY};

fn app(model: FakeModel) -> Router {
    let session = SessionManager::restore(Box::new(MemorySessionStore::default()));
    let state = AppState::new(
        Arc::new(model),
        GenerationSettings::default(),
        DocumentStyles::default(),
        session,
    );
    router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &Router) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/session/login",
            serde_json::json!({ "email": "doc@clinic.test", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn generate_body(name: &str, age: &str) -> serde_json::Value {
    serde_json::json!({
        "patient": { "name": name, "age": age, "gender": "Female" },
        "tool": "ISAA"
    })
}

#[tokio::test]
async fn health_and_tools_are_public() {
    let app = app(FakeModel::replying(ISAA_REPLY));

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = app.oneshot(get("/tools")).await.unwrap();
    let tools = body_json(response).await;
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 10);
    assert_eq!(tools[0]["id"], "MISIC");
    assert!(tools.iter().any(|t| t["id"] == "ADHD-RS"));
}

#[tokio::test]
async fn reports_need_a_session() {
    let model = FakeModel::replying(ISAA_REPLY);
    let app = app(model);

    let response = app.clone().oneshot(get("/reports")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", "10")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get("/session")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_generate_and_export() {
    let app = app(FakeModel::replying(ISAA_REPLY));
    login(&app).await;

    let response = app.clone().oneshot(get("/session")).await.unwrap();
    let session = body_json(response).await;
    assert_eq!(session["email"], "doc@clinic.test");
    assert_eq!(session["isAuthenticated"], true);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", "10")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["tool"], "ISAA");
    assert_eq!(report["patient"]["name"], "Jane Doe");
    assert_eq!(report["summary"], "Findings suggest mild difficulties.");
    let id = report["id"].as_str().unwrap().to_string();

    let response = app.clone().oneshot(get("/reports")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app.clone().oneshot(get("/reports/current")).await.unwrap();
    assert_eq!(body_json(response).await["id"], id.as_str());

    let response = app
        .clone()
        .oneshot(get(&format!("/reports/{id}/export/doc")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/msword");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Jane_Doe_ISAA_Report.doc\""
    );

    let response = app
        .clone()
        .oneshot(get(&format!("/reports/{id}/export/docx")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));

    let response = app
        .clone()
        .oneshot(get(&format!("/reports/{id}/print")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("window.print()"));
    assert!(html.contains("Jane Doe"));
}

#[tokio::test]
async fn reset_and_select_drive_the_current_report() {
    let app = app(FakeModel::replying(ISAA_REPLY));
    login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", "10")))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(Request::post("/reports/reset").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/reports/current")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/reports/{id}/select"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/reports/{}/select", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_age_is_a_bad_request() {
    let app = app(FakeModel::replying(ISAA_REPLY));
    login(&app).await;

    let response = app
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", " ")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Please fill in at least the name and age."
    );
}

#[tokio::test]
async fn model_failure_is_reported_generically() {
    let app = app(FakeModel::with_replies(vec![Err(
        "ValidationException: secret internal detail".to_string(),
    )]));
    login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", "10")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate report. Please try again.");
    assert!(!body.to_string().contains("secret internal detail"));

    let response = app.oneshot(get("/reports")).await.unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_history() {
    let app = app(FakeModel::replying(ISAA_REPLY));
    login(&app).await;

    app.clone()
        .oneshot(json_request("POST", "/reports", generate_body("Jane Doe", "10")))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(Request::post("/session/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/reports")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login(&app).await;
    let response = app.oneshot(get("/reports")).await.unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}
