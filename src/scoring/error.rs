use thiserror::Error;

use crate::embedding::{CrossEncoderError, EmbeddingError};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("cross-encoder scoring failed: {0}")]
    CrossEncoder(#[from] CrossEncoderError),
}
