use std::future::Future;
use std::pin::Pin;

use crate::error::BedrockError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One outbound request to the model service.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub model_id: String,
    pub prompt: String,
    /// JSON Schema the reply is constrained to.
    pub schema: serde_json::Value,
    /// Extended-reasoning budget. Affects quality and latency only.
    pub thinking_budget_tokens: Option<u32>,
}

/// A generative-model service that answers a prompt with a JSON text body.
///
/// Implementations perform exactly one network call per `complete` and
/// return `Ok(None)` when the service replied without any text.
///
/// Methods return boxed futures for dyn compatibility.
pub trait ReportModel: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> BoxFuture<'a, Result<Option<String>, BedrockError>>;
}
