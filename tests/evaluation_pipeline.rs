//! End-to-end pipeline tests over the extraction, scoring and report layers.
//!
//! These run with stub models and mock oracles (the `mock` feature), entering
//! the pipeline at the already-extracted-pages stage so no PDF renderer or
//! external OCR service is needed.

use std::sync::Arc;

use chrono::Utc;
use image::{GrayImage, Luma};
use tempfile::TempDir;

use gradex::constants::CANONICAL_EDGE;
use gradex::document::PageRasterizer;
use gradex::embedding::{CrossEncoder, SentenceEmbedder};
use gradex::extraction::{ExtractedPage, ExtractionStatus, TextExtractor};
use gradex::ocr::MockOracle;
use gradex::report::{EvaluationResult, FsReportStore};
use gradex::scoring::TextSimilarityScorer;
use gradex::session::{EvaluationSession, Evaluator, SessionRegistry};

fn evaluator() -> Evaluator {
    let extractor = TextExtractor::new(
        Arc::new(MockOracle::fixed("reference")),
        Arc::new(MockOracle::fixed("candidate")),
    );
    let scorer = TextSimilarityScorer::new(SentenceEmbedder::stub(), CrossEncoder::stub());
    Evaluator::new(PageRasterizer::new(), extractor, scorer)
}

fn ok_page(index: usize, text: &str) -> ExtractedPage {
    ExtractedPage {
        index,
        text: text.to_string(),
        status: ExtractionStatus::Ok,
    }
}

fn failed_page(index: usize) -> ExtractedPage {
    ExtractedPage {
        index,
        text: String::new(),
        status: ExtractionStatus::Failed,
    }
}

fn session(reference: Vec<ExtractedPage>) -> EvaluationSession {
    let images = vec![None; reference.len()];
    EvaluationSession {
        exam_id: "bio-101".to_string(),
        exam_name: "Biology Final".to_string(),
        reference_pages: reference,
        reference_images: images,
        loaded_at: Utc::now(),
    }
}

fn flat_image(luma: u8) -> Option<GrayImage> {
    Some(GrayImage::from_pixel(CANONICAL_EDGE, CANONICAL_EDGE, Luma([luma])))
}

#[test]
fn faithful_answers_outscore_unrelated_ones() {
    let evaluator = evaluator();
    let session = session(vec![
        ok_page(0, "Cats are mammals and feed their young with milk"),
        ok_page(1, "Water boils at 100 degrees celsius at sea level"),
    ]);

    let faithful = evaluator.evaluate_pages(
        &session,
        "roll-1",
        "Faithful",
        &[
            ok_page(0, "Cats are mammals, they feed their young with milk"),
            ok_page(1, "Water boils at 100 degrees celsius at sea level"),
        ],
        &[None, None],
    );

    let unrelated = evaluator.evaluate_pages(
        &session,
        "roll-2",
        "Unrelated",
        &[
            ok_page(0, "The French revolution began in 1789"),
            ok_page(1, "Photosynthesis happens in the chloroplast"),
        ],
        &[None, None],
    );

    assert!(faithful.total_mark > unrelated.total_mark);
    for (good, bad) in faithful.pages.iter().zip(unrelated.pages.iter()) {
        assert!(good.final_mark >= bad.final_mark);
    }
}

#[test]
fn partially_wrong_answer_scores_between_perfect_and_unrelated() {
    let evaluator = evaluator();
    let session = session(vec![
        ok_page(0, "cats are mammals"),
        ok_page(1, "water boils at 100C"),
    ]);

    let result = evaluator.evaluate_pages(
        &session,
        "roll-1",
        "S",
        &[ok_page(0, "cats are mammals"), ok_page(1, "water boils at 50C")],
        &[None, None],
    );

    // Page 0 is verbatim; page 1 differs in one token and must land strictly
    // lower while staying a valid whole mark.
    assert_eq!(result.pages[0].final_mark, 7);
    assert!(result.pages[1].final_mark < result.pages[0].final_mark);
    assert!(result.pages[1].final_mark <= 10);
    assert!(result.pages[1].lexical_score > 0.0);
}

#[test]
fn negated_answer_loses_marks() {
    let evaluator = evaluator();
    let session = session(vec![ok_page(0, "Water boils at 100 degrees celsius")]);

    let faithful = evaluator.evaluate_pages(
        &session,
        "roll-1",
        "S",
        &[ok_page(0, "Water boils at 100 degrees celsius")],
        &[None],
    );
    let negated = evaluator.evaluate_pages(
        &session,
        "roll-2",
        "S",
        &[ok_page(0, "Water does not boil at 100 degrees celsius")],
        &[None],
    );

    assert!(negated.pages[0].lexical_score < faithful.pages[0].lexical_score / 1.5);
    assert!(negated.pages[0].final_mark < faithful.pages[0].final_mark);
}

#[test]
fn five_page_submission_with_one_failure_still_grades_the_rest() {
    let evaluator = evaluator();
    let reference: Vec<ExtractedPage> = (0..5)
        .map(|i| ok_page(i, "Mitochondria are the site of cellular respiration"))
        .collect();
    let session = session(reference);

    let candidate: Vec<ExtractedPage> = (0..5)
        .map(|i| {
            if i == 2 {
                failed_page(i)
            } else {
                ok_page(i, "Mitochondria are the site of cellular respiration")
            }
        })
        .collect();

    let result = evaluator.evaluate_pages(
        &session,
        "roll-1",
        "S",
        &candidate,
        &[None, None, None, None, None],
    );

    assert_eq!(result.pages.len(), 5);
    assert_eq!(result.pages[2].final_mark, 0);
    assert!(result.pages[2].scoring_error.is_none());
    for i in [0usize, 1, 3, 4] {
        assert!(result.pages[i].final_mark >= 6);
    }
}

#[test]
fn extra_candidate_pages_are_counted_not_graded() {
    let evaluator = evaluator();
    let session = session(vec![ok_page(0, "Water boils at 100 degrees celsius")]);

    let result = evaluator.evaluate_pages(
        &session,
        "roll-1",
        "S",
        &[
            ok_page(0, "Water boils at 100 degrees celsius"),
            ok_page(1, "An extra page that has no reference counterpart"),
        ],
        &[None, None],
    );

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.reference_page_count, 1);
    assert_eq!(result.candidate_page_count, 2);
    assert_eq!(result.max_mark, 10);
}

#[test]
fn matching_page_images_lift_the_final_mark() {
    let evaluator = evaluator();
    let text = "Water boils at 100 degrees celsius";

    let mut with_images = session(vec![ok_page(0, text)]);
    with_images.reference_images = vec![flat_image(120)];

    let text_only = evaluator.evaluate_pages(
        &session(vec![ok_page(0, text)]),
        "roll-1",
        "S",
        &[ok_page(0, text)],
        &[None],
    );
    let with_image = evaluator.evaluate_pages(
        &with_images,
        "roll-1",
        "S",
        &[ok_page(0, text)],
        &[flat_image(120)],
    );

    assert_eq!(text_only.pages[0].final_mark, 7);
    assert_eq!(with_image.pages[0].final_mark, 10);
}

#[test]
fn reinstalling_a_reference_regrades_against_the_new_key() {
    let evaluator = evaluator();
    let registry = SessionRegistry::new();

    registry.install(session(vec![ok_page(0, "Cats are mammals")]));
    let first = registry.get("bio-101").unwrap();
    let graded_against_first = evaluator.evaluate_pages(
        &first,
        "roll-1",
        "S",
        &[ok_page(0, "Cats are mammals")],
        &[None],
    );

    registry.install(session(vec![ok_page(0, "The French revolution began in 1789")]));
    let second = registry.get("bio-101").unwrap();
    let graded_against_second = evaluator.evaluate_pages(
        &second,
        "roll-1",
        "S",
        &[ok_page(0, "Cats are mammals")],
        &[None],
    );

    assert!(graded_against_first.pages[0].final_mark > graded_against_second.pages[0].final_mark);
}

#[test]
fn graded_report_round_trips_through_the_store() {
    let evaluator = evaluator();
    let dir = TempDir::new().unwrap();
    let store = FsReportStore::new(dir.path().to_path_buf());

    let session = session(vec![ok_page(0, "Water boils at 100 degrees celsius")]);
    let result = evaluator.evaluate_pages(
        &session,
        "roll-42",
        "A. Student",
        &[ok_page(0, "Water boils at about 100 degrees")],
        &[None],
    );

    store.save(&result).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exam_id, "bio-101");
    assert_eq!(listed[0].student_id, "roll-42");
    assert_eq!(listed[0].pages[0].reference_text, result.pages[0].reference_text);
    assert_eq!(
        (listed[0].total_mark, listed[0].max_mark),
        EvaluationResult::tally(&listed[0].pages)
    );
}
