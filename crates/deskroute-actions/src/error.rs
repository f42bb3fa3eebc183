use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Store(#[from] deskroute_core::Error),

    #[error("failed to encode result data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
