use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("identifier {value:?} has no filesystem-safe characters")]
    InvalidIdentifier { value: String },

    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
