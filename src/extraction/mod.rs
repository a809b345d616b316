//! Page text extraction.
//!
//! Bridges rasterized pages to transcription oracles. Reference sheets go to
//! the machine-print oracle as rendered; candidate sheets pass through
//! [`clean_for_handwriting`] before the handwriting oracle sees them. Every
//! input page yields exactly one [`ExtractedPage`], failures included.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::constants::MIN_EXTRACTED_LEN;
use crate::document::RasterPage;
use crate::imaging::clean_for_handwriting;
use crate::ocr::OcrOracle;

/// Which transcription path a document takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Machine-printed answer key, transcribed as rendered.
    Reference,
    /// Handwritten answer sheet, cleaned before transcription.
    Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Usable text came back.
    Ok,
    /// The page transcribed to nothing (or below the usable minimum).
    Empty,
    /// The page never produced text: render failure or oracle failure.
    Failed,
}

/// One page's transcription outcome. `text` is empty unless `status` is
/// [`ExtractionStatus::Ok`].
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub index: usize,
    pub text: String,
    pub status: ExtractionStatus,
}

impl ExtractedPage {
    fn failed(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
            status: ExtractionStatus::Failed,
        }
    }

    fn empty(index: usize) -> Self {
        Self {
            index,
            text: String::new(),
            status: ExtractionStatus::Empty,
        }
    }
}

/// Runs pages through the oracle matching their document role.
pub struct TextExtractor {
    reference_oracle: Arc<dyn OcrOracle>,
    candidate_oracle: Arc<dyn OcrOracle>,
}

impl TextExtractor {
    pub fn new(reference_oracle: Arc<dyn OcrOracle>, candidate_oracle: Arc<dyn OcrOracle>) -> Self {
        Self {
            reference_oracle,
            candidate_oracle,
        }
    }

    /// Transcribes every page. Output order and length match the input; a
    /// failed page never aborts the batch.
    pub async fn extract(&self, pages: &[RasterPage], mode: ExtractionMode) -> Vec<ExtractedPage> {
        let mut extracted = Vec::with_capacity(pages.len());
        for page in pages {
            extracted.push(self.extract_page(page, mode).await);
        }
        extracted
    }

    async fn extract_page(&self, page: &RasterPage, mode: ExtractionMode) -> ExtractedPage {
        let Some(ref image) = page.image else {
            warn!(page = page.index, "Page has no rendered image, marking failed");
            return ExtractedPage::failed(page.index);
        };

        let result = match mode {
            ExtractionMode::Reference => self.reference_oracle.transcribe(image).await,
            ExtractionMode::Candidate => {
                let cleaned = DynamicImage::ImageLuma8(clean_for_handwriting(image));
                self.candidate_oracle.transcribe(&cleaned).await
            }
        };

        match result {
            Ok(text) => {
                let text = text.trim().to_string();
                if text.len() < MIN_EXTRACTED_LEN {
                    debug!(page = page.index, chars = text.len(), "Transcription below minimum");
                    ExtractedPage::empty(page.index)
                } else {
                    ExtractedPage {
                        index: page.index,
                        text,
                        status: ExtractionStatus::Ok,
                    }
                }
            }
            Err(e) => {
                warn!(page = page.index, error = %e, "Transcription failed, continuing");
                ExtractedPage::failed(page.index)
            }
        }
    }
}
