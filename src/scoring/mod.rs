//! Pairwise answer scoring and mark fusion.
//!
//! [`TextSimilarityScorer`] turns a (candidate, reference) text pair into two
//! 0..100 sub-scores: a lexical score from embedding cosine and a contextual
//! score from the cross-encoder logit squashed through a sigmoid. Both halve
//! when exactly one side negates.
//!
//! [`ScoreFuser`] is pure arithmetic on top: sub-scores become a text mark out
//! of ten, structural image similarity becomes a stepped image mark, and the
//! weighted blend rounds to the final integer mark.

pub mod error;
mod fuser;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use fuser::ScoreFuser;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::NEGATION_PENALTY;
use crate::embedding::{CrossEncoder, SentenceEmbedder, cosine_similarity};
use crate::textnorm::{contains_negation, normalize};

/// Text sub-scores for one page pair, both in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScores {
    /// Embedding cosine similarity, scaled to 0..100.
    pub lexical: f64,
    /// Sigmoid-squashed cross-encoder logit, scaled to 0..100.
    pub contextual: f64,
}

/// Everything recorded about one aligned page pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageScore {
    pub page_index: usize,
    pub candidate_text: String,
    pub reference_text: String,
    pub lexical_score: f64,
    pub contextual_score: f64,
    /// Text mark out of ten, before image fusion.
    pub text_mark: f64,
    /// Structural similarity in `0..=1`, when both page images rendered.
    pub image_similarity: Option<f64>,
    pub image_mark: f64,
    /// Final integer mark out of ten.
    pub final_mark: u8,
    /// Set when scoring this pair failed; all marks are zero in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_error: Option<String>,
}

/// Scores candidate text against reference text with both text models.
pub struct TextSimilarityScorer {
    embedder: SentenceEmbedder,
    cross_encoder: CrossEncoder,
}

impl TextSimilarityScorer {
    pub fn new(embedder: SentenceEmbedder, cross_encoder: CrossEncoder) -> Self {
        Self {
            embedder,
            cross_encoder,
        }
    }

    /// Scores one pair. Inputs are original extracted texts; normalization
    /// happens here so callers never feed the models inconsistent shapes.
    pub fn score(&self, candidate: &str, reference: &str) -> Result<TextScores, ScoringError> {
        let mut scores = self.raw_scores(candidate, reference)?;

        // Negation runs on the originals: markers are stop words and vanish
        // under normalization.
        if contains_negation(candidate) != contains_negation(reference) {
            debug!("Negation mismatch, halving text scores");
            scores.lexical *= NEGATION_PENALTY;
            scores.contextual *= NEGATION_PENALTY;
        }

        Ok(scores)
    }

    fn raw_scores(&self, candidate: &str, reference: &str) -> Result<TextScores, ScoringError> {
        let candidate_norm = normalize(candidate);
        let reference_norm = normalize(reference);

        let candidate_vec = self.embedder.embed(&candidate_norm)?;
        let reference_vec = self.embedder.embed(&reference_norm)?;
        let cosine = cosine_similarity(&candidate_vec, &reference_vec).clamp(0.0, 1.0);

        let logit = self.cross_encoder.score(&candidate_norm, &reference_norm)?;

        Ok(TextScores {
            lexical: cosine as f64 * 100.0,
            contextual: sigmoid(logit as f64) * 100.0,
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
