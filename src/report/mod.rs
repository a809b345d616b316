//! Evaluation results and their on-disk store.
//!
//! One [`EvaluationResult`] per (exam, student) pair, stored file-per-report
//! as JSON. Saving the same pair again replaces the previous report, so a
//! re-upload is always an upsert.

pub mod error;
mod store;


pub use error::ReportError;
pub use store::FsReportStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::PageScore;

/// The full graded outcome of one candidate submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub exam_id: String,
    pub exam_name: String,
    pub student_id: String,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
    /// Page counts before alignment, so truncation is visible in the report.
    pub reference_page_count: usize,
    pub candidate_page_count: usize,
    pub pages: Vec<PageScore>,
    /// Sum of per-page final marks.
    pub total_mark: u32,
    /// Ten marks per aligned page.
    pub max_mark: u32,
}

impl EvaluationResult {
    /// Computes the mark totals from `pages`.
    pub fn tally(pages: &[PageScore]) -> (u32, u32) {
        let total = pages.iter().map(|p| p.final_mark as u32).sum();
        let max = pages.len() as u32 * 10;
        (total, max)
    }
}
