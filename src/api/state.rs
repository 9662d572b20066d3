use std::sync::Arc;

use tokio::sync::RwLock;

use crate::storage::{PlayerDirectory, ResultSink};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn PlayerDirectory>,
    pub sink: Arc<dyn ResultSink>,
    /// Held for writing across each load, merge and store of assignments
    pub assignments_lock: Arc<RwLock<()>>,
    pub balance_by_tier: bool,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn PlayerDirectory>,
        sink: Arc<dyn ResultSink>,
        balance_by_tier: bool,
        cors_origin: String,
    ) -> Self {
        Self {
            directory,
            sink,
            assignments_lock: Arc::new(RwLock::new(())),
            balance_by_tier,
            cors_origin,
        }
    }
}
