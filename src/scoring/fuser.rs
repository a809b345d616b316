//! Mark fusion arithmetic.

use crate::constants::{
    CONTEXTUAL_WEIGHT, IMAGE_MARK_BUCKETS, IMAGE_WEIGHT, LEXICAL_WEIGHT, TEXT_WEIGHT,
};

use super::TextScores;

/// Stateless mark arithmetic. Kept as a type rather than free functions so the
/// evaluation loop carries one fusion policy end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFuser;

impl ScoreFuser {
    pub fn new() -> Self {
        Self
    }

    /// Text mark out of ten from the two 0..100 sub-scores.
    pub fn text_mark(&self, scores: &TextScores) -> f64 {
        10.0 * (LEXICAL_WEIGHT * scores.lexical / 100.0
            + CONTEXTUAL_WEIGHT * scores.contextual / 100.0)
    }

    /// Image mark out of ten from structural similarity. `None` (either page
    /// image missing) contributes nothing.
    pub fn image_mark(&self, similarity: Option<f64>) -> f64 {
        let Some(similarity) = similarity else {
            return 0.0;
        };

        for (threshold, mark) in IMAGE_MARK_BUCKETS {
            if similarity > threshold {
                return mark;
            }
        }
        0.0
    }

    /// Final integer mark: weighted blend of text and image marks, rounded
    /// half away from zero.
    pub fn final_mark(&self, text_mark: f64, image_mark: f64) -> u8 {
        let fused = TEXT_WEIGHT * text_mark + IMAGE_WEIGHT * image_mark;
        fused.round().clamp(0.0, 10.0) as u8
    }
}
