use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid engine config: {reason}")]
    Config { reason: String },

    #[error("conflicting audience: viewing yourself and reportee view are both set")]
    ConflictingAudience,
}

pub type Result<T> = std::result::Result<T, EngineError>;
