//! Shared application state.

use lexis_runtime::AnalysisOrchestrator;
use lexis_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub store: SqliteStore,
    pub orchestrator: AnalysisOrchestrator,
}

impl AppState {
    pub fn new(store: SqliteStore, orchestrator: AnalysisOrchestrator) -> Self {
        Self {
            store,
            orchestrator,
        }
    }
}
