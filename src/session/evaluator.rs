//! End-to-end evaluation pipeline.

use chrono::Utc;
use image::GrayImage;
use tracing::{info, warn};

use crate::document::{PageRasterizer, RasterPage};
use crate::extraction::{ExtractedPage, ExtractionMode, ExtractionStatus, TextExtractor};
use crate::imaging::{canonicalize, structural_similarity};
use crate::report::EvaluationResult;
use crate::scoring::{PageScore, ScoreFuser, TextScores, TextSimilarityScorer};

use super::error::SessionError;
use super::{EvaluationSession, align};

/// Runs documents through rasterize, transcribe, score, fuse.
pub struct Evaluator {
    rasterizer: PageRasterizer,
    extractor: TextExtractor,
    scorer: TextSimilarityScorer,
    fuser: ScoreFuser,
}

impl Evaluator {
    pub fn new(
        rasterizer: PageRasterizer,
        extractor: TextExtractor,
        scorer: TextSimilarityScorer,
    ) -> Self {
        Self {
            rasterizer,
            extractor,
            scorer,
            fuser: ScoreFuser::new(),
        }
    }

    /// Builds a session from a reference sheet PDF.
    pub async fn ingest_reference(
        &self,
        exam_id: &str,
        exam_name: &str,
        pdf_bytes: &[u8],
    ) -> Result<EvaluationSession, SessionError> {
        let pages = self.rasterizer.rasterize(pdf_bytes)?;
        if pages.is_empty() {
            return Err(SessionError::EmptyReference {
                exam_id: exam_id.to_string(),
            });
        }

        let reference_images = canonical_images(&pages);
        let reference_pages = self.extractor.extract(&pages, ExtractionMode::Reference).await;

        let usable = reference_pages
            .iter()
            .filter(|p| p.status == ExtractionStatus::Ok)
            .count();
        info!(
            exam_id,
            pages = reference_pages.len(),
            usable,
            "Reference sheet ingested"
        );

        Ok(EvaluationSession {
            exam_id: exam_id.to_string(),
            exam_name: exam_name.to_string(),
            reference_pages,
            reference_images,
            loaded_at: Utc::now(),
        })
    }

    /// Grades a candidate submission PDF against `session`.
    pub async fn evaluate(
        &self,
        session: &EvaluationSession,
        student_id: &str,
        student_name: &str,
        pdf_bytes: &[u8],
    ) -> Result<EvaluationResult, SessionError> {
        let pages = self.rasterizer.rasterize(pdf_bytes)?;
        let candidate_images = canonical_images(&pages);
        let candidate_pages = self.extractor.extract(&pages, ExtractionMode::Candidate).await;

        Ok(self.evaluate_pages(
            session,
            student_id,
            student_name,
            &candidate_pages,
            &candidate_images,
        ))
    }

    /// Grades already-extracted candidate pages. Split out from [`evaluate`]
    /// so the pairing and scoring path is exercisable without a PDF renderer.
    ///
    /// [`evaluate`]: Evaluator::evaluate
    pub fn evaluate_pages(
        &self,
        session: &EvaluationSession,
        student_id: &str,
        student_name: &str,
        candidate_pages: &[ExtractedPage],
        candidate_images: &[Option<GrayImage>],
    ) -> EvaluationResult {
        let alignment = align(session.page_count(), candidate_pages.len());
        if alignment.dropped_reference > 0 || alignment.dropped_candidate > 0 {
            warn!(
                exam_id = %session.exam_id,
                student_id,
                dropped_reference = alignment.dropped_reference,
                dropped_candidate = alignment.dropped_candidate,
                "Page counts differ, grading the aligned prefix"
            );
        }

        let mut pages = Vec::with_capacity(alignment.pair_count);
        for i in 0..alignment.pair_count {
            pages.push(self.score_pair(
                i,
                &session.reference_pages[i],
                &candidate_pages[i],
                session.reference_images.get(i).and_then(Option::as_ref),
                candidate_images.get(i).and_then(Option::as_ref),
            ));
        }

        let (total_mark, max_mark) = EvaluationResult::tally(&pages);

        info!(
            exam_id = %session.exam_id,
            student_id,
            graded_pages = pages.len(),
            total_mark,
            max_mark,
            "Submission evaluated"
        );

        EvaluationResult {
            exam_id: session.exam_id.clone(),
            exam_name: session.exam_name.clone(),
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            created_at: Utc::now(),
            reference_page_count: session.page_count(),
            candidate_page_count: candidate_pages.len(),
            pages,
            total_mark,
            max_mark,
        }
    }

    fn score_pair(
        &self,
        page_index: usize,
        reference: &ExtractedPage,
        candidate: &ExtractedPage,
        reference_image: Option<&GrayImage>,
        candidate_image: Option<&GrayImage>,
    ) -> PageScore {
        let image_similarity = match (reference_image, candidate_image) {
            (Some(a), Some(b)) => match structural_similarity(a, b) {
                Ok(similarity) => Some(similarity),
                Err(e) => {
                    warn!(page = page_index, error = %e, "Image comparison failed");
                    None
                }
            },
            _ => None,
        };

        let both_usable = reference.status == ExtractionStatus::Ok
            && candidate.status == ExtractionStatus::Ok;

        let (text_scores, scoring_error) = if both_usable {
            match self.scorer.score(&candidate.text, &reference.text) {
                Ok(scores) => (scores, None),
                Err(e) => {
                    warn!(page = page_index, error = %e, "Text scoring failed");
                    (zero_scores(), Some(e.to_string()))
                }
            }
        } else {
            (zero_scores(), None)
        };

        let text_mark = self.fuser.text_mark(&text_scores);
        let image_mark = self.fuser.image_mark(image_similarity);
        let final_mark = self.fuser.final_mark(text_mark, image_mark);

        PageScore {
            page_index,
            candidate_text: candidate.text.clone(),
            reference_text: reference.text.clone(),
            lexical_score: text_scores.lexical,
            contextual_score: text_scores.contextual,
            text_mark,
            image_similarity,
            image_mark,
            final_mark,
            scoring_error,
        }
    }
}

fn zero_scores() -> TextScores {
    TextScores {
        lexical: 0.0,
        contextual: 0.0,
    }
}

fn canonical_images(pages: &[RasterPage]) -> Vec<Option<GrayImage>> {
    pages
        .iter()
        .map(|p| p.image.as_ref().map(canonicalize))
        .collect()
}
