//! Error types for the conversation store.

use thiserror::Error;

use tether_core::error::TetherError;
use tether_core::types::ValidationError;
use tether_transfer::TransferError;

/// Errors from the log store, contact directory, and session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("owner name cannot be empty")]
    EmptyOwner,

    #[error("message cannot be empty")]
    EmptyMessage,

    #[error("contact `{0}` already exists")]
    DuplicateContact(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl From<StoreError> for TetherError {
    fn from(err: StoreError) -> Self {
        TetherError::Store(err.to_string())
    }
}
