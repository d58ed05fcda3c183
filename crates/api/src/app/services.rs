//! Store and analysis-service wiring for the HTTP app.

use std::sync::{Arc, RwLock};

use restock_infra::{
    AnalysisService, InMemoryProposalStore, InMemorySnapshotStore, ProposalStore,
};
use restock_reports::RunSnapshot;

/// Everything the route handlers need, shared behind one `Arc`.
pub struct AppServices {
    pub snapshots: Arc<InMemorySnapshotStore>,
    pub proposals: Arc<InMemoryProposalStore>,
    pub analysis: AnalysisService<Arc<InMemorySnapshotStore>>,
    /// Global metrics captured per run, in run order. Feeds the trend report.
    pub run_history: RwLock<Vec<RunSnapshot>>,
}

pub fn build_services() -> AppServices {
    let snapshots = Arc::new(InMemorySnapshotStore::new());
    let proposals = Arc::new(InMemoryProposalStore::new());
    let analysis = AnalysisService::new(
        Arc::clone(&snapshots),
        Arc::clone(&proposals) as Arc<dyn ProposalStore>,
    );

    AppServices {
        snapshots,
        proposals,
        analysis,
        run_history: RwLock::new(Vec::new()),
    }
}
