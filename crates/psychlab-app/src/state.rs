use std::sync::Arc;

use tokio::sync::Mutex;

use psychlab_bedrock::client::ReportModel;
use psychlab_bedrock::generate::GenerationSettings;
use psychlab_export::styles::DocumentStyles;

use crate::dashboard::Dashboard;
use crate::session::SessionManager;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ReportModel>,
    pub settings: GenerationSettings,
    pub styles: Arc<DocumentStyles>,
    pub session: Arc<Mutex<SessionManager>>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(
        model: Arc<dyn ReportModel>,
        settings: GenerationSettings,
        styles: DocumentStyles,
        session: SessionManager,
    ) -> Self {
        Self {
            model,
            settings,
            styles: Arc::new(styles),
            session: Arc::new(Mutex::new(session)),
            dashboard: Arc::new(Dashboard::new()),
        }
    }
}
