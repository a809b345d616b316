use super::*;
use crate::embedding::{CrossEncoder, SentenceEmbedder};

fn stub_scorer() -> TextSimilarityScorer {
    TextSimilarityScorer::new(SentenceEmbedder::stub(), CrossEncoder::stub())
}

#[test]
fn test_scores_stay_in_range() {
    let scorer = stub_scorer();
    let pairs = [
        ("cats are mammals", "cats are mammals"),
        ("water boils at 100c", "water boils at 50c"),
        ("photosynthesis", "the french revolution"),
        ("", "cats are mammals"),
    ];

    for (candidate, reference) in pairs {
        let scores = scorer.score(candidate, reference).unwrap();
        assert!((0.0..=100.0).contains(&scores.lexical), "{scores:?}");
        assert!((0.0..=100.0).contains(&scores.contextual), "{scores:?}");
    }
}

#[test]
fn test_identical_text_hits_lexical_ceiling() {
    let scorer = stub_scorer();
    let scores = scorer
        .score("Cats are mammals.", "Cats are mammals.")
        .unwrap();

    assert!((scores.lexical - 100.0).abs() < 1e-3, "{scores:?}");
    // Sigmoid never reaches 1.0 but the +4 logit ceiling gets close.
    assert!(scores.contextual > 98.0, "{scores:?}");
}

#[test]
fn test_related_text_beats_unrelated() {
    let scorer = stub_scorer();
    let related = scorer
        .score("Water boils at 100 degrees", "Water boils at 100 degrees celsius")
        .unwrap();
    let unrelated = scorer
        .score("The mitochondria is the powerhouse", "Water boils at 100 degrees celsius")
        .unwrap();

    assert!(related.lexical > unrelated.lexical);
    assert!(related.contextual > unrelated.contextual);
}

#[test]
fn test_negation_mismatch_halves_both_scores() {
    let scorer = stub_scorer();
    let candidate = "Water is not hot";
    let reference = "Water is hot";

    let raw = scorer.raw_scores(candidate, reference).unwrap();
    let penalized = scorer.score(candidate, reference).unwrap();

    assert!((penalized.lexical - raw.lexical * 0.5).abs() < 1e-6);
    assert!((penalized.contextual - raw.contextual * 0.5).abs() < 1e-6);
}

#[test]
fn test_negation_on_both_sides_is_not_penalized() {
    let scorer = stub_scorer();
    let candidate = "Water is not hot";
    let reference = "Water is never hot";

    let raw = scorer.raw_scores(candidate, reference).unwrap();
    let scored = scorer.score(candidate, reference).unwrap();

    assert_eq!(raw, scored);
}

#[test]
fn test_contraction_counts_as_negation() {
    let scorer = stub_scorer();
    let raw = scorer.raw_scores("Water isn't hot", "Water is hot").unwrap();
    let scored = scorer.score("Water isn't hot", "Water is hot").unwrap();

    assert!((scored.lexical - raw.lexical * 0.5).abs() < 1e-6);
}

#[test]
fn test_text_mark_weights_contextual_higher() {
    let fuser = ScoreFuser::new();

    let lexical_only = TextScores {
        lexical: 100.0,
        contextual: 0.0,
    };
    let contextual_only = TextScores {
        lexical: 0.0,
        contextual: 100.0,
    };

    assert!((fuser.text_mark(&lexical_only) - 4.0).abs() < 1e-9);
    assert!((fuser.text_mark(&contextual_only) - 6.0).abs() < 1e-9);
}

#[test]
fn test_perfect_sub_scores_give_full_text_mark() {
    let fuser = ScoreFuser::new();
    let perfect = TextScores {
        lexical: 100.0,
        contextual: 100.0,
    };
    assert!((fuser.text_mark(&perfect) - 10.0).abs() < 1e-9);
}

#[test]
fn test_image_mark_buckets() {
    let fuser = ScoreFuser::new();

    assert_eq!(fuser.image_mark(Some(0.95)), 10.0);
    assert_eq!(fuser.image_mark(Some(0.75)), 8.0);
    assert_eq!(fuser.image_mark(Some(0.60)), 6.0);
    assert_eq!(fuser.image_mark(Some(0.45)), 4.0);
    assert_eq!(fuser.image_mark(Some(0.10)), 0.0);
    assert_eq!(fuser.image_mark(None), 0.0);
}

#[test]
fn test_image_mark_bucket_thresholds_are_exclusive() {
    let fuser = ScoreFuser::new();

    // A similarity sitting exactly on a threshold falls into the bucket below.
    assert_eq!(fuser.image_mark(Some(0.85)), 8.0);
    assert_eq!(fuser.image_mark(Some(0.70)), 6.0);
    assert_eq!(fuser.image_mark(Some(0.55)), 4.0);
    assert_eq!(fuser.image_mark(Some(0.40)), 0.0);
}

#[test]
fn test_final_mark_rounds_half_up() {
    let fuser = ScoreFuser::new();

    // 0.7 * 9.0 + 0.3 * 8.0 = 8.7 -> 9
    assert_eq!(fuser.final_mark(9.0, 8.0), 9);
    // 0.7 * 6.0 + 0.3 * 1.0 = 4.5 -> 5
    assert_eq!(fuser.final_mark(6.0, 1.0), 5);
    // 0.7 * 2.0 + 0.3 * 2.0 = 2.0 -> 2
    assert_eq!(fuser.final_mark(2.0, 2.0), 2);
}

#[test]
fn test_missing_image_caps_final_mark_at_seven() {
    let fuser = ScoreFuser::new();
    // Perfect text, no image signal: 0.7 * 10 = 7.
    assert_eq!(fuser.final_mark(10.0, fuser.image_mark(None)), 7);
}

#[test]
fn test_full_marks_need_both_signals() {
    let fuser = ScoreFuser::new();
    assert_eq!(fuser.final_mark(10.0, 10.0), 10);
}
