//! Cross-cutting policy constants.
//!
//! These values are deliberate grading policy, not tuning knobs. Changing any
//! of them changes what a stored mark means, so they live in one place.

/// Rasterization resolution, in DPI. 4x the 72 DPI PDF base so extracted
/// glyphs stay legible to both OCR paths.
pub const RENDER_DPI: u32 = 288;

/// Edge length of the canonical square every page image is resized to before
/// structural comparison. Differing source page sizes never reach the SSIM
/// kernel.
pub const CANONICAL_EDGE: u32 = 500;

/// Extracted text shorter than this (after trimming) is treated as an empty
/// extraction rather than a genuine short answer.
pub const MIN_EXTRACTED_LEN: usize = 5;

/// Weight of the embedding-cosine (lexical) score inside the text mark.
pub const LEXICAL_WEIGHT: f64 = 0.4;

/// Weight of the cross-encoder (contextual) score inside the text mark.
/// Contextual alignment is deliberately weighted above raw lexical overlap.
pub const CONTEXTUAL_WEIGHT: f64 = 0.6;

/// Weight of the text mark in the final fused mark.
pub const TEXT_WEIGHT: f64 = 0.7;

/// Weight of the image mark in the final fused mark.
pub const IMAGE_WEIGHT: f64 = 0.3;

/// Multiplier applied to both text sub-scores when exactly one side of a pair
/// contains a negation marker.
pub const NEGATION_PENALTY: f64 = 0.5;

/// Step-function buckets mapping structural image similarity to a mark out of
/// ten, highest threshold first. Coarse on purpose: visual similarity of
/// handwritten pages is a weak signal and finer buckets would imply false
/// precision.
pub const IMAGE_MARK_BUCKETS: [(f64, f64); 4] =
    [(0.85, 10.0), (0.70, 8.0), (0.55, 6.0), (0.40, 4.0)];

/// Embedding dimension of the default sentence-embedding model (MiniLM
/// family). Stub embeddings use the same dimension so the cosine math is
/// identical in tests.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Maximum token length fed to either text model.
pub const MAX_SEQ_LEN: usize = 512;
