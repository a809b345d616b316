//! Gradex library crate (used by the server binary and integration tests).
//!
//! Automated grading for scanned exam sheets. A reference answer key and a
//! candidate submission both arrive as PDFs; pages are rasterized,
//! transcribed, paired positionally and scored with a sentence embedder, a
//! cross-encoder and a structural image comparison. The fused per-page marks
//! land in a stored report.
//!
//! # Module map
//!
//! - [`document`] - PDF to page bitmaps
//! - [`imaging`] - handwriting cleanup and structural comparison
//! - [`ocr`] - transcription backends (tesseract sidecar, vision model)
//! - [`extraction`] - pages to text with per-page failure isolation
//! - [`textnorm`] - normalization and negation detection
//! - [`embedding`] - sentence embedder and cross-encoder (candle)
//! - [`scoring`] - pair scoring and mark fusion
//! - [`session`] - loaded reference sheets and the evaluation pipeline
//! - [`report`] - results and their on-disk store
//! - [`gateway`] - the Axum HTTP surface
//!
//! Mock transcription oracles and stub model backends are available behind
//! `#[cfg(any(test, feature = "mock"))]` so the full pipeline runs without
//! model weights or external services.

pub mod config;
pub mod constants;
pub mod document;
pub mod embedding;
pub mod extraction;
pub mod gateway;
pub mod imaging;
pub mod ocr;
pub mod report;
pub mod scoring;
pub mod session;
pub mod textnorm;

pub use config::{Config, ConfigError};
pub use document::{PageRasterizer, RasterError, RasterPage};
pub use embedding::{
    CrossEncoder, CrossEncoderConfig, EmbedderConfig, SentenceEmbedder, cosine_similarity,
};
pub use extraction::{ExtractedPage, ExtractionMode, ExtractionStatus, TextExtractor};
pub use imaging::{canonicalize, clean_for_handwriting, structural_similarity};
pub use ocr::{OcrOracle, TesseractClient, VisionClient};
pub use report::{EvaluationResult, FsReportStore, ReportError};
pub use scoring::{PageScore, ScoreFuser, ScoringError, TextScores, TextSimilarityScorer};
pub use session::{Alignment, EvaluationSession, Evaluator, SessionError, SessionRegistry, align};

#[cfg(any(test, feature = "mock"))]
pub use ocr::MockOracle;
