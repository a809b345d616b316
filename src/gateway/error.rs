use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::report::ReportError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no reference sheet loaded for exam {0:?}")]
    SessionNotReady(String),

    #[error("document rejected: {0}")]
    DocumentUnreadable(String),

    #[error("report storage failed: {0}")]
    StorageFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<SessionError> for GatewayError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotReady { exam_id } => GatewayError::SessionNotReady(exam_id),
            SessionError::EmptyReference { .. } => GatewayError::DocumentUnreadable(err.to_string()),
            SessionError::Raster(e) => GatewayError::DocumentUnreadable(e.to_string()),
        }
    }
}

impl From<ReportError> for GatewayError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidIdentifier { .. } => GatewayError::InvalidRequest(err.to_string()),
            other => GatewayError::StorageFailed(other.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::SessionNotReady(_) => StatusCode::NOT_FOUND,
            GatewayError::DocumentUnreadable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::StorageFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
