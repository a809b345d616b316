use std::sync::Arc;

use image::DynamicImage;

use super::*;
use crate::ocr::MockOracle;

fn rendered_page(index: usize) -> RasterPage {
    RasterPage {
        index,
        image: Some(DynamicImage::new_luma8(64, 64)),
    }
}

fn broken_page(index: usize) -> RasterPage {
    RasterPage { index, image: None }
}

fn extractor_with(candidate: MockOracle) -> TextExtractor {
    TextExtractor::new(
        Arc::new(MockOracle::fixed("reference key text")),
        Arc::new(candidate),
    )
}

#[tokio::test]
async fn test_ok_page_carries_text() {
    let extractor = extractor_with(MockOracle::fixed("cats are mammals"));
    let pages = vec![rendered_page(0)];

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].status, ExtractionStatus::Ok);
    assert_eq!(extracted[0].text, "cats are mammals");
    assert_eq!(extracted[0].index, 0);
}

#[tokio::test]
async fn test_short_transcription_is_empty() {
    let extractor = extractor_with(MockOracle::fixed("hi"));
    let pages = vec![rendered_page(0)];

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted[0].status, ExtractionStatus::Empty);
    assert_eq!(extracted[0].text, "");
}

#[tokio::test]
async fn test_whitespace_only_transcription_is_empty() {
    let extractor = extractor_with(MockOracle::fixed("   \n  "));
    let pages = vec![rendered_page(0)];

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted[0].status, ExtractionStatus::Empty);
}

#[tokio::test]
async fn test_unrendered_page_is_failed_without_oracle_call() {
    let oracle = MockOracle::scripted(["should not be consumed"]);
    let extractor = extractor_with(oracle);
    let pages = vec![broken_page(0), rendered_page(1)];

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted[0].status, ExtractionStatus::Failed);
    // The script was spent on page 1, proving page 0 never reached the oracle.
    assert_eq!(extracted[1].text, "should not be consumed");
}

#[tokio::test]
async fn test_oracle_failure_does_not_abort_batch() {
    let oracle = MockOracle::fixed("the mitochondria is the powerhouse");
    oracle.push_failure("connection refused");
    let extractor = extractor_with(oracle);
    let pages = vec![rendered_page(0), rendered_page(1)];

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted[0].status, ExtractionStatus::Failed);
    assert_eq!(extracted[1].status, ExtractionStatus::Ok);
}

#[tokio::test]
async fn test_reference_mode_uses_reference_oracle() {
    let extractor = extractor_with(MockOracle::fixed("handwritten text"));
    let pages = vec![rendered_page(0)];

    let extracted = extractor.extract(&pages, ExtractionMode::Reference).await;

    assert_eq!(extracted[0].text, "reference key text");
}

#[tokio::test]
async fn test_output_length_matches_input() {
    let extractor = extractor_with(MockOracle::fixed("an answer long enough"));
    let pages: Vec<RasterPage> = (0..5)
        .map(|i| if i == 2 { broken_page(i) } else { rendered_page(i) })
        .collect();

    let extracted = extractor.extract(&pages, ExtractionMode::Candidate).await;

    assert_eq!(extracted.len(), 5);
    for (i, page) in extracted.iter().enumerate() {
        assert_eq!(page.index, i);
    }
    assert_eq!(extracted[2].status, ExtractionStatus::Failed);
}
