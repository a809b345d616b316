use thiserror::Error;

use super::super::error::EmbeddingError;

#[derive(Debug, Error)]
pub enum CrossEncoderError {
    #[error("failed to load cross-encoder model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("cross-encoder inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid cross-encoder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for CrossEncoderError {
    fn from(err: candle_core::Error) -> Self {
        CrossEncoderError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for CrossEncoderError {
    fn from(err: EmbeddingError) -> Self {
        CrossEncoderError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
