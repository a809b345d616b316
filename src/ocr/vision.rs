//! Vision-model transcription for handwritten pages.
//!
//! Sends the cleaned page image inline (base64 PNG) with a verbatim
//! transcription instruction. The model is told to emit raw text only so the
//! scoring layer never sees commentary.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest, ContentPart};
use image::DynamicImage;
use tracing::debug;

use super::error::OcrError;
use super::{OcrOracle, encode_png};

const TRANSCRIBE_PROMPT: &str = "You are an OCR engine. Read this handwritten answer sheet. \
     Extract ALL visible handwritten text exactly as written. \
     Do NOT summarize. Do NOT explain. Output only the raw text.";

pub struct VisionClient {
    client: Client,
    model: String,
}

impl std::fmt::Debug for VisionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionClient")
            .field("model", &self.model)
            .finish()
    }
}

impl VisionClient {
    /// Credentials are resolved from the environment by the underlying client.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl OcrOracle for VisionClient {
    async fn transcribe(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;
        let encoded = BASE64.encode(&png);

        let request = ChatRequest::new(vec![ChatMessage::user(vec![
            ContentPart::from_text(TRANSCRIBE_PROMPT),
            ContentPart::from_binary_base64("image/png", encoded, None),
        ])]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| OcrError::RequestFailed {
                reason: e.to_string(),
            })?;

        let text = response
            .first_text()
            .ok_or_else(|| OcrError::BadResponse {
                reason: "response carried no text content".to_string(),
            })?;

        debug!(model = %self.model, chars = text.len(), "Vision transcription complete");

        Ok(text.trim().to_string())
    }
}
