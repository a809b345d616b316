//! Filesystem report store (file-per-report layout).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::ReportError;
use super::EvaluationResult;

const REPORT_EXTENSION: &str = "json";

const TEMP_EXTENSION: &str = "json.tmp";

/// Stores one JSON file per (exam, student) report under
/// `<root>/<exam_id>/<student_id>.json`.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    root: PathBuf,
}

impl FsReportStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn exam_path(&self, exam_id: &str) -> Result<PathBuf, ReportError> {
        Ok(self.root.join(sanitize_id(exam_id)?))
    }

    fn report_path(&self, exam_id: &str, student_id: &str) -> Result<PathBuf, ReportError> {
        Ok(self
            .exam_path(exam_id)?
            .join(format!("{}.{}", sanitize_id(student_id)?, REPORT_EXTENSION)))
    }

    /// Writes `result`, replacing any previous report for the same
    /// (exam, student) pair. Temp-write plus rename keeps readers from ever
    /// seeing a half-written file.
    pub fn save(&self, result: &EvaluationResult) -> Result<PathBuf, ReportError> {
        let exam_dir = self.exam_path(&result.exam_id)?;
        fs::create_dir_all(&exam_dir)?;

        let final_path = self.report_path(&result.exam_id, &result.student_id)?;
        let temp_path = final_path.with_extension(TEMP_EXTENSION);

        let bytes = serde_json::to_vec_pretty(result)?;

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &final_path)?;

        debug!(path = %final_path.display(), "Report saved");
        Ok(final_path)
    }

    /// Loads every stored report, newest first by `created_at`.
    pub fn list(&self) -> Result<Vec<EvaluationResult>, ReportError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();

        for exam_entry in fs::read_dir(&self.root)? {
            let exam_path = exam_entry?.path();
            if !exam_path.is_dir() {
                continue;
            }
            self.collect_reports(&exam_path, &mut reports)?;
        }

        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Loads reports for one exam, newest first.
    pub fn list_for_exam(&self, exam_id: &str) -> Result<Vec<EvaluationResult>, ReportError> {
        let exam_path = self.exam_path(exam_id)?;
        if !exam_path.exists() {
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();
        self.collect_reports(&exam_path, &mut reports)?;
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    fn collect_reports(
        &self,
        exam_path: &Path,
        reports: &mut Vec<EvaluationResult>,
    ) -> Result<(), ReportError> {
        for entry in fs::read_dir(exam_path)? {
            let path = entry?.path();

            let Some(ext) = path.extension() else {
                continue;
            };
            if ext != REPORT_EXTENSION {
                continue;
            }

            match fs::read(&path).map_err(ReportError::from).and_then(|bytes| {
                serde_json::from_slice::<EvaluationResult>(&bytes).map_err(ReportError::from)
            }) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable report");
                }
            }
        }
        Ok(())
    }
}

/// Maps an external identifier to a filesystem-safe name. Alphanumerics,
/// hyphens and underscores pass through; everything else becomes `_`.
fn sanitize_id(id: &str) -> Result<String, ReportError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_alphanumeric()) {
        return Err(ReportError::InvalidIdentifier {
            value: id.to_string(),
        });
    }

    Ok(trimmed
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect())
}
