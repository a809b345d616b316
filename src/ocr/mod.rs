//! Transcription oracles.
//!
//! Two backends sit behind the [`OcrOracle`] trait: a tesseract HTTP sidecar
//! for clean machine-printed reference sheets, and a vision-model client for
//! handwritten candidate sheets. Callers pick the oracle per document role;
//! this module only turns one page image into text.

pub mod error;
pub mod tesseract;
pub mod vision;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::OcrError;
pub use tesseract::TesseractClient;
pub use vision::VisionClient;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;

use std::io::Cursor;

use async_trait::async_trait;
use image::DynamicImage;

/// A backend that transcribes a single page image to text.
#[async_trait]
pub trait OcrOracle: Send + Sync {
    /// Returns the transcribed text, trimmed. An empty string is a valid
    /// result (blank page); transport and backend failures are errors.
    async fn transcribe(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Encodes a page image as PNG for transport to a backend.
pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, OcrError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}
