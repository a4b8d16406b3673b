//! Application state shared across handlers.

use std::sync::Arc;

use qwen_runtime::EnginePool;

use crate::service::CompletionService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-request orchestration.
    pub service: CompletionService,
    /// Worker pool, exposed for health reporting and shutdown.
    pub pool: Arc<EnginePool>,
}

impl AppState {
    pub fn new(pool: Arc<EnginePool>) -> Self {
        Self {
            service: CompletionService::new(pool.clone()),
            pool,
        }
    }
}
