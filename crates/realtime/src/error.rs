use thiserror::Error;

/// Errors raised while encoding or decoding realtime frames.
#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode frame: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid client frame: {0}")]
    InvalidClientFrame(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RealtimeError>;
