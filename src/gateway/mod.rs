//! HTTP gateway (Axum) for exam uploads, grading and reports.
//!
//! This module is primarily used by the `gradex` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{
    reports_handler, reset_handler, upload_candidate_handler, upload_reference_handler,
};
pub use state::HandlerState;

/// Upload cap for a single multipart request. Scanned multi-page PDFs at
/// 288 DPI run large.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/upload/reference", post(upload_reference_handler))
        .route("/upload/candidate", post(upload_candidate_handler))
        .route("/reports", get(reports_handler))
        .route("/reset/{exam_id}", post(reset_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub report_store: &'static str,
    pub loaded_exams: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let store_status = if state.store.root().exists() && state.store.root().is_dir() {
        "ready"
    } else {
        "error"
    };

    let components = ComponentStatus {
        http: "ready",
        report_store: store_status,
        loaded_exams: state.registry.len(),
    };

    let is_ready = components.report_store == "ready";
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadyResponse {
            status: if is_ready { "ready" } else { "degraded" },
            components,
        }),
    )
        .into_response()
}
