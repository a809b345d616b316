//! Exam evaluation sessions.
//!
//! A session is one loaded reference sheet: its transcribed pages plus their
//! canonical page images, keyed by exam id. The [`SessionRegistry`] holds the
//! live sessions; the [`Evaluator`] runs candidate submissions against one.
//!
//! Page pairing is strictly positional. Reference page `i` grades candidate
//! page `i`, and whichever side is longer loses its tail. Unmatched pages are
//! counted, not scored.

pub mod error;
mod evaluator;
mod registry;


pub use error::SessionError;
pub use evaluator::Evaluator;
pub use registry::SessionRegistry;

use chrono::{DateTime, Utc};
use image::GrayImage;

use crate::extraction::ExtractedPage;

/// One loaded reference sheet, immutable once installed.
#[derive(Debug, Clone)]
pub struct EvaluationSession {
    pub exam_id: String,
    pub exam_name: String,
    /// Transcribed reference pages, in page order.
    pub reference_pages: Vec<ExtractedPage>,
    /// Canonicalized reference page images, index-matched to
    /// `reference_pages`. `None` where rendering failed.
    pub reference_images: Vec<Option<GrayImage>>,
    pub loaded_at: DateTime<Utc>,
}

impl EvaluationSession {
    pub fn page_count(&self) -> usize {
        self.reference_pages.len()
    }
}

/// How two page sequences line up under positional pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Number of scored (reference, candidate) pairs.
    pub pair_count: usize,
    /// Reference pages beyond the candidate's length.
    pub dropped_reference: usize,
    /// Candidate pages beyond the reference's length.
    pub dropped_candidate: usize,
}

/// Pairs pages by index, truncating to the shorter side.
pub fn align(reference_len: usize, candidate_len: usize) -> Alignment {
    let pair_count = reference_len.min(candidate_len);
    Alignment {
        pair_count,
        dropped_reference: reference_len - pair_count,
        dropped_candidate: candidate_len - pair_count,
    }
}
