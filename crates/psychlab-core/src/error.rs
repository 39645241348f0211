use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown assessment tool: {0}")]
    UnknownTool(String),

    #[error("unknown gender: {0}")]
    UnknownGender(String),
}
