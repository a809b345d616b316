//! Request handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use tracing::info;

use crate::extraction::ExtractionStatus;

use super::error::GatewayError;
use super::payload::{
    EvaluationResponse, ReferenceLoadedResponse, ReportsQuery, ReportsResponse, ResetResponse,
};
use super::state::HandlerState;

/// Fields accepted by the two upload endpoints.
#[derive(Debug, Default)]
struct UploadFields {
    pdf: Option<Vec<u8>>,
    exam_id: Option<String>,
    exam_name: Option<String>,
    student_id: Option<String>,
    student_name: Option<String>,
}

async fn collect_upload_fields(mut multipart: Multipart) -> Result<UploadFields, GatewayError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "pdf" => {
                let bytes = field.bytes().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("failed to read pdf field: {}", e))
                })?;
                fields.pdf = Some(bytes.to_vec());
            }
            "exam_id" | "exam_name" | "student_id" | "student_name" => {
                let value = field.text().await.map_err(|e| {
                    GatewayError::InvalidRequest(format!("failed to read {} field: {}", name, e))
                })?;
                match name.as_str() {
                    "exam_id" => fields.exam_id = Some(value),
                    "exam_name" => fields.exam_name = Some(value),
                    "student_id" => fields.student_id = Some(value),
                    _ => fields.student_name = Some(value),
                }
            }
            other => {
                info!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(fields)
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, GatewayError> {
    value.ok_or_else(|| GatewayError::InvalidRequest(format!("missing {} field", name)))
}

/// `POST /upload/reference` - load (or replace) an exam's answer key.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_reference_handler(
    State(state): State<HandlerState>,
    multipart: Multipart,
) -> Result<Json<ReferenceLoadedResponse>, GatewayError> {
    let fields = collect_upload_fields(multipart).await?;

    let pdf = require(fields.pdf, "pdf")?;
    let exam_id = require(fields.exam_id, "exam_id")?;
    let exam_name = fields.exam_name.unwrap_or_else(|| exam_id.clone());

    let session = state
        .evaluator
        .ingest_reference(&exam_id, &exam_name, &pdf)
        .await?;

    let usable_pages = session
        .reference_pages
        .iter()
        .filter(|p| p.status == ExtractionStatus::Ok)
        .count();
    let page_count = session.page_count();

    state.registry.install(session);

    Ok(Json(ReferenceLoadedResponse {
        exam_id,
        exam_name,
        page_count,
        usable_pages,
    }))
}

/// `POST /upload/candidate` - grade a submission and store the report.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_candidate_handler(
    State(state): State<HandlerState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResponse>, GatewayError> {
    let fields = collect_upload_fields(multipart).await?;

    let pdf = require(fields.pdf, "pdf")?;
    let exam_id = require(fields.exam_id, "exam_id")?;
    let student_id = require(fields.student_id, "student_id")?;
    let student_name = fields.student_name.unwrap_or_else(|| student_id.clone());

    let session = state.registry.get(&exam_id)?;

    let report = state
        .evaluator
        .evaluate(&session, &student_id, &student_name, &pdf)
        .await?;

    state.store.save(&report)?;

    Ok(Json(EvaluationResponse { report }))
}

/// `GET /reports` - stored reports, newest first, optionally per exam.
#[tracing::instrument(skip(state))]
pub async fn reports_handler(
    State(state): State<HandlerState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<ReportsResponse>, GatewayError> {
    let reports = match query.exam_id {
        Some(ref exam_id) => state.store.list_for_exam(exam_id)?,
        None => state.store.list()?,
    };

    Ok(Json(ReportsResponse { reports }))
}

/// `POST /reset/{exam_id}` - drop the loaded reference for an exam.
#[tracing::instrument(skip(state))]
pub async fn reset_handler(
    State(state): State<HandlerState>,
    Path(exam_id): Path<String>,
) -> Json<ResetResponse> {
    let reset = state.registry.reset(&exam_id);
    Json(ResetResponse { exam_id, reset })
}
