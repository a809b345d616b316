//! Sentence embedder (MiniLM-family checkpoint + tokenizer).
//!
//! Use [`EmbedderConfig::stub`] for tests/examples without model files. Stub
//! embeddings are deterministic hashed bags of words in the same dimension as
//! the real model, so the surrounding cosine math is identical either way.

pub mod config;


pub use config::EmbedderConfig;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::BertSentenceEncoder;
use super::device::select_device;
use super::error::EmbeddingError;

enum EmbedderBackend {
    Model {
        model: BertSentenceEncoder,
        tokenizer: Box<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Dense sentence-embedding oracle (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode when no path is set).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        if let Err(reason) = config.validate() {
            return Err(EmbeddingError::InvalidConfig { reason });
        }

        let Some(ref model_path) = config.model_path else {
            warn!("No embedder model path configured, running in stub mode");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        };

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        if !model_path.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: model_path.clone(),
            });
        }

        let model = BertSentenceEncoder::load(model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load sentence encoder: {}", e),
            }
        })?;

        if config.embedding_dim > model.hidden_size() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) exceeds model hidden_size ({})",
                    config.embedding_dim,
                    model.hidden_size()
                ),
            });
        }

        let tokenizer = Tokenizer::from_file(model_path.join("tokenizer.json")).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_path = %model_path.display(),
            embedding_dim = config.embedding_dim,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                model,
                tokenizer: Box::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Convenience constructor for stub mode.
    pub fn stub() -> Self {
        Self {
            backend: EmbedderBackend::Stub,
            config: EmbedderConfig::stub(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Generates an L2-normalized embedding for `text`.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.embed_with_model(text, model, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &BertSentenceEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        let mut type_ids: Vec<u32> = encoding.get_type_ids().to_vec();
        let mut mask: Vec<u32> = encoding.get_attention_mask().to_vec();

        if tokens.is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        if tokens.len() > self.config.max_seq_len {
            tokens.truncate(self.config.max_seq_len);
            type_ids.truncate(self.config.max_seq_len);
            mask.truncate(self.config.max_seq_len);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating sentence embedding"
        );

        let input_ids = Tensor::new(&tokens[..], device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(&type_ids[..], device)?.unsqueeze(0)?;
        let mask = Tensor::new(&mask[..], device)?.unsqueeze(0)?;

        let pooled = model.forward_pooled(&input_ids, &type_ids, &mask)?;
        let full: Vec<f32> = pooled.to_vec1::<f32>()?;

        Ok(l2_normalize(
            full.into_iter().take(self.config.embedding_dim).collect(),
        ))
    }

    /// Deterministic hashed bag-of-words embedding.
    ///
    /// Shared tokens hash to the same component with the same sign, so texts
    /// with overlapping vocabulary get high cosine similarity and identical
    /// texts get exactly 1.0.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut vector = vec![0.0f32; self.config.embedding_dim];
        for token in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let h = hasher.finish();

            let idx = (h % self.config.embedding_dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        l2_normalize(vector)
    }
}

fn l2_normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}

/// Cosine similarity between two equal-length vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
