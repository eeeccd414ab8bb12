//! Error types for the assistant boundary.

use thiserror::Error;

use tether_core::error::TetherError;
use tether_store::StoreError;

/// Errors from the assistant persona engine.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("API key is missing or blank")]
    MissingApiKey,

    #[error("experimental mode requires a persona bundle")]
    MissingPersona,

    #[error("unknown chat mode `{0}`")]
    UnknownMode(String),

    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),

    #[error("invalid example line: {0}")]
    InvalidExample(String),

    #[error("completion failed: {0}")]
    Completion(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AssistError> for TetherError {
    fn from(err: AssistError) -> Self {
        TetherError::Assist(err.to_string())
    }
}
