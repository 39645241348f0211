use std::sync::Arc;

use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use psychlab_app::aws::build_aws_config;
use psychlab_app::config::{config_info, load_or_default};
use psychlab_app::router;
use psychlab_app::session::{FileSessionStore, SessionManager};
use psychlab_app::state::AppState;
use psychlab_bedrock::converse::BedrockReportModel;
use psychlab_export::styles::DocumentStyles;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = load_or_default()?;
    info!(config = ?config_info(&config), "loaded config");

    let sdk_config = build_aws_config(&config.region, &config.credentials).await;
    let model = Arc::new(BedrockReportModel::new(&sdk_config));

    let store = FileSessionStore::default_location()?;
    let session = SessionManager::restore(Box::new(store));

    let state = AppState::new(
        model,
        config.generation_settings(),
        DocumentStyles::default(),
        session,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!(addr = %config.bind_addr, model = %config.model_id, "psychlab listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// `RUST_LOG` filtering (default `info`); JSON lines when
/// `PSYCHLAB_LOG_FORMAT=json`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("PSYCHLAB_LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
