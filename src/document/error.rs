use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("document could not be read: {reason}")]
    DocumentUnreadable { reason: String },
}
