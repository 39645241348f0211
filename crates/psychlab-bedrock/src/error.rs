use thiserror::Error;

/// Failures talking to the model service. Carries full detail for logs.
#[derive(Debug, Error)]
pub enum BedrockError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("request construction failed: {0}")]
    Request(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a reply body could not be turned into a `ReportResult`.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("model returned no text")]
    Empty,

    #[error("reply is not a conforming JSON object: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("reply has a blank fullReport")]
    BlankReport,
}

/// Opaque failure surfaced past the pipeline boundary.
///
/// The variants name the failure kind only. Details are logged where the
/// failure happens and never carried to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("report generation failed: model service error")]
    TransportFailure,

    #[error("report generation failed: empty response")]
    EmptyResponse,

    #[error("report generation failed: malformed response")]
    MalformedResponse,
}

impl ReportError {
    /// The message shown to the end user for every failure kind.
    pub fn user_message(&self) -> &'static str {
        "Failed to generate report. Please try again."
    }
}

impl From<ResponseError> for ReportError {
    fn from(e: ResponseError) -> Self {
        match e {
            ResponseError::Empty => ReportError::EmptyResponse,
            ResponseError::Malformed(_) | ResponseError::BlankReport => {
                ReportError::MalformedResponse
            }
        }
    }
}
