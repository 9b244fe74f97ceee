use thiserror::Error;

/// Failures at the edges of the field: chat transport and persisted JSON.
///
/// Nothing in the simulation itself returns an error; degenerate numbers are
/// clamped in place instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("chat endpoint responded with status {status}")]
    Http { status: u16 },
    #[error("chat transport failed: {0}")]
    Transport(String),
    #[error("chat request timed out")]
    Timeout,
    #[error("message is empty")]
    EmptyMessage,
}

pub type Result<T> = std::result::Result<T, Error>;
