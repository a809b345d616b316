//! Text model oracles.
//!
//! - [`embedder`] turns a normalized answer into a dense sentence vector
//!   (lexical similarity is cosine over these).
//! - [`crossencoder`] scores a (candidate, reference) pair with a
//!   sequence-classification head (contextual similarity).
//!
//! Both load BERT-family safetensors checkpoints through candle and fall back
//! to deterministic stub implementations when no model path is configured, so
//! the whole pipeline runs in tests and on machines without model files.

/// BERT model wrappers shared by both oracles.
pub mod bert;
/// Compute device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

pub mod crossencoder;
pub mod embedder;

pub use crossencoder::{CrossEncoder, CrossEncoderConfig, CrossEncoderError};
pub use embedder::{EmbedderConfig, SentenceEmbedder, cosine_similarity};
pub use error::EmbeddingError;
