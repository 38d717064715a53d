//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("chat component JSON parse error: {0}")]
    ChatJson(#[from] serde_json::Error),

    #[error("invalid chat component: {0}")]
    InvalidComponent(String),
}
