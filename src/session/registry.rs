//! In-memory session registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::error::SessionError;
use super::EvaluationSession;

/// Live sessions keyed by exam id. Installing a session for an existing exam
/// replaces it atomically; in-flight evaluations keep their `Arc` to the old
/// session and finish against it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<EvaluationSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, session: EvaluationSession) -> Arc<EvaluationSession> {
        let session = Arc::new(session);
        let replaced = self
            .sessions
            .write()
            .insert(session.exam_id.clone(), Arc::clone(&session));

        info!(
            exam_id = %session.exam_id,
            pages = session.page_count(),
            replaced = replaced.is_some(),
            "Reference session installed"
        );
        session
    }

    pub fn get(&self, exam_id: &str) -> Result<Arc<EvaluationSession>, SessionError> {
        self.sessions
            .read()
            .get(exam_id)
            .cloned()
            .ok_or_else(|| SessionError::NotReady {
                exam_id: exam_id.to_string(),
            })
    }

    /// Drops the session for `exam_id`. Returns `false` when none existed.
    pub fn reset(&self, exam_id: &str) -> bool {
        let removed = self.sessions.write().remove(exam_id).is_some();
        if removed {
            info!(exam_id, "Reference session reset");
        }
        removed
    }

    /// Exam ids with a loaded session, unordered.
    pub fn loaded_exams(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
