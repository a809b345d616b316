use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to encode page image: {reason}")]
    EncodingFailed { reason: String },

    #[error("OCR request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("OCR backend returned an unusable response: {reason}")]
    BadResponse { reason: String },
}

impl From<image::ImageError> for OcrError {
    fn from(err: image::ImageError) -> Self {
        OcrError::EncodingFailed {
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        OcrError::RequestFailed {
            reason: err.to_string(),
        }
    }
}
