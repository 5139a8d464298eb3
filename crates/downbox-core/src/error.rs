//! Public failure surface of the save operation.

use thiserror::Error;

/// Error returned by the save operation. Exactly two kinds cross the
/// channel boundary: a caller contract violation and a save failure
/// carrying the underlying cause's message.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The caller omitted the byte buffer or the file name. Surfaced
    /// before any write is attempted.
    #[error("Missing bytes or fileName")]
    InvalidArgs,
    /// Registry insert, stream open, write, or publish failed.
    #[error("{message}")]
    Save { message: String },
}

impl SaveError {
    /// Short machine-readable code used in channel error replies.
    pub fn code(&self) -> &'static str {
        match self {
            SaveError::InvalidArgs => "INVALID_ARGS",
            SaveError::Save { .. } => "SAVE_ERROR",
        }
    }
}

impl From<anyhow::Error> for SaveError {
    /// Wraps an underlying failure, flattening its context chain into
    /// the message so the caller sees the cause.
    fn from(err: anyhow::Error) -> Self {
        SaveError::Save {
            message: format!("{err:#}"),
        }
    }
}
