use serde::{Deserialize, Serialize};

use crate::report::EvaluationResult;

/// Response for a successful reference upload.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReferenceLoadedResponse {
    pub exam_id: String,
    pub exam_name: String,
    pub page_count: usize,
    /// Pages that yielded usable text.
    pub usable_pages: usize,
}

/// Response for a candidate evaluation; wraps the stored report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvaluationResponse {
    pub report: EvaluationResult,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReportsResponse {
    pub reports: Vec<EvaluationResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResetResponse {
    pub exam_id: String,
    /// `false` when no session was loaded for the exam.
    pub reset: bool,
}

/// Query parameters for `GET /reports`.
#[derive(Deserialize, Debug, Default)]
pub struct ReportsQuery {
    pub exam_id: Option<String>,
}
