//! Pairwise sequence-relatedness oracle (cross-encoder).
//!
//! [`CrossEncoder::score`] returns a **raw logit**; the scoring layer owns
//! the sigmoid squashing and scaling. The stub backend emits a logit derived
//! from word overlap in roughly `[-4, 4]` so the downstream squashing path is
//! exercised identically with or without a real model.

pub mod config;
pub mod error;


pub use config::CrossEncoderConfig;
pub use error::CrossEncoderError;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::BertPairClassifier;
use super::device::select_device;

enum CrossEncoderBackend {
    Model {
        model: BertPairClassifier,
        tokenizer: Box<Tokenizer>,
        device: Device,
    },
    Stub,
}

pub struct CrossEncoder {
    backend: CrossEncoderBackend,
    config: CrossEncoderConfig,
}

impl std::fmt::Debug for CrossEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossEncoder")
            .field(
                "backend",
                &match &self.backend {
                    CrossEncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    CrossEncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .finish()
    }
}

impl CrossEncoder {
    pub fn load(config: CrossEncoderConfig) -> Result<Self, CrossEncoderError> {
        if let Err(reason) = config.validate() {
            return Err(CrossEncoderError::InvalidConfig { reason });
        }

        let Some(ref model_path) = config.model_path else {
            warn!("No cross-encoder model path configured, running in stub mode");
            return Ok(Self {
                backend: CrossEncoderBackend::Stub,
                config,
            });
        };

        let device = select_device()?;
        debug!(?device, "Selected compute device for cross-encoder");

        for required in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_path.join(required).exists() {
                return Err(CrossEncoderError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        let model = BertPairClassifier::load(model_path, &device).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load pair classifier: {}", e),
            }
        })?;

        let tokenizer = Tokenizer::from_file(model_path.join("tokenizer.json")).map_err(|e| {
            CrossEncoderError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(model_path = %model_path.display(), "Cross-encoder model loaded");

        Ok(Self {
            backend: CrossEncoderBackend::Model {
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
            backend: CrossEncoderBackend::Stub,
            config: CrossEncoderConfig::stub(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        matches!(self.backend, CrossEncoderBackend::Model { .. })
    }

    /// Scores a (candidate, reference) pair, returning the raw logit.
    pub fn score(&self, candidate: &str, reference: &str) -> Result<f32, CrossEncoderError> {
        debug!(
            candidate_len = candidate.len(),
            reference_len = reference.len(),
            model_loaded = self.is_model_loaded(),
            "Scoring text pair"
        );

        match &self.backend {
            CrossEncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.score_with_model(candidate, reference, model, tokenizer, device),
            CrossEncoderBackend::Stub => Ok(self.stub_logit(candidate, reference)),
        }
    }

    fn score_with_model(
        &self,
        candidate: &str,
        reference: &str,
        model: &BertPairClassifier,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<f32, CrossEncoderError> {
        let tokens = tokenizer.encode((candidate, reference), true).map_err(|e| {
            CrossEncoderError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let take = tokens.get_ids().len().min(self.config.max_seq_len);

        let token_ids = Tensor::new(&tokens.get_ids()[..take], device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(&tokens.get_type_ids()[..take], device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(&tokens.get_attention_mask()[..take], device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| CrossEncoderError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let score = logits.flatten_all()?.to_vec1::<f32>()?[0];
        Ok(score)
    }

    /// Word-overlap placeholder mapped onto a logit scale.
    ///
    /// Recall-weighted Jaccard in `[0, 1]`, centered and stretched so that
    /// identical texts land near `+4` and disjoint texts near `-4`.
    fn stub_logit(&self, candidate: &str, reference: &str) -> f32 {
        use std::collections::HashSet;

        let candidate_lower = candidate.to_lowercase();
        let candidate_words: HashSet<&str> = candidate_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let reference_lower = reference.to_lowercase();
        let reference_words: HashSet<&str> = reference_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if reference_words.is_empty() || candidate_words.is_empty() {
            return -4.0;
        }

        let matches = reference_words.intersection(&candidate_words).count();
        let recall = matches as f32 / reference_words.len() as f32;

        let union = reference_words.union(&candidate_words).count();
        let jaccard = matches as f32 / union as f32;

        let base = 0.6 * recall + 0.4 * jaccard;

        8.0 * (base - 0.5)
    }
}
