use std::sync::Arc;

use crate::report::FsReportStore;
use crate::session::{Evaluator, SessionRegistry};

#[derive(Clone)]
pub struct HandlerState {
    pub registry: Arc<SessionRegistry>,

    pub evaluator: Arc<Evaluator>,

    pub store: Arc<FsReportStore>,
}

impl HandlerState {
    pub fn new(
        registry: Arc<SessionRegistry>,
        evaluator: Arc<Evaluator>,
        store: Arc<FsReportStore>,
    ) -> Self {
        Self {
            registry,
            evaluator,
            store,
        }
    }
}
