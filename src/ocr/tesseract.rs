//! HTTP client for a tesseract sidecar.
//!
//! Speaks the `POST /tesseract` multipart protocol (an `options` JSON field
//! plus a `file` part) and reads the recognized text from `data.stdout`.

use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use super::error::OcrError;
use super::{OcrOracle, encode_png};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TesseractResponse {
    data: TesseractData,
}

#[derive(Debug, Deserialize)]
struct TesseractData {
    stdout: String,
    #[serde(default)]
    stderr: String,
}

#[derive(Debug, Clone)]
pub struct TesseractClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TesseractClient {
    pub fn new(base_url: &str) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OcrError::RequestFailed {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/tesseract", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl OcrOracle for TesseractClient {
    async fn transcribe(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;

        let form = Form::new()
            .text("options", r#"{"languages":["eng"]}"#)
            .part(
                "file",
                Part::bytes(png)
                    .file_name("page.png")
                    .mime_str("image/png")
                    .map_err(|e| OcrError::RequestFailed {
                        reason: e.to_string(),
                    })?,
            );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::BadResponse {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: TesseractResponse =
            response.json().await.map_err(|e| OcrError::BadResponse {
                reason: format!("invalid JSON body: {}", e),
            })?;

        if !parsed.data.stderr.is_empty() {
            debug!(stderr = %parsed.data.stderr, "tesseract reported warnings");
        }

        Ok(parsed.data.stdout.trim().to_string())
    }
}
