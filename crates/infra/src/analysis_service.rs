use chrono::Utc;
use restock_analysis::{run_analysis, AnalysisReport};
use std::sync::Arc;
use thiserror::Error;

use crate::proposal_store::ProposalStore;
use crate::snapshot_store::{SnapshotStore, SnapshotStoreError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis aborted: {0}")]
    Fetch(#[from] SnapshotStoreError),
}

/// Orchestrates one analysis run: fetch the snapshot, derive the report,
/// persist the generated proposals.
///
/// The run is all-or-nothing on the fetch side: a snapshot failure aborts
/// before anything is written to the proposal store.
pub struct AnalysisService<S> {
    snapshots: S,
    proposals: Arc<dyn ProposalStore>,
}

impl<S: SnapshotStore> AnalysisService<S> {
    pub fn new(snapshots: S, proposals: Arc<dyn ProposalStore>) -> Self {
        Self {
            snapshots,
            proposals,
        }
    }

    pub async fn run(&self) -> Result<AnalysisReport, AnalysisError> {
        let snapshot = self.snapshots.fetch_snapshot().await?;
        let report = run_analysis(&snapshot, Utc::now());

        for entry_id in &report.orphaned_entries {
            tracing::warn!(
                entry_id = %entry_id,
                "stock entry references an unknown shop or article, skipped"
            );
        }
        for entry_id in &report.range_warnings {
            tracing::warn!(
                entry_id = %entry_id,
                "stock entry has min > max, classified as-is"
            );
        }

        for proposal in &report.transfer_proposals {
            self.proposals.insert(proposal.clone());
        }

        tracing::info!(
            total_items = report.global.total_items,
            rupture = report.global.rupture_count,
            overstock = report.global.overstock_count,
            proposals = report.transfer_proposals.len(),
            "analysis run completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal_store::InMemoryProposalStore;
    use crate::snapshot_store::InMemorySnapshotStore;
    use async_trait::async_trait;
    use restock_catalog::{Article, Shop};
    use restock_core::{ArticleId, ShopId, StockEntryId};
    use restock_stock::{StockEntry, StockSnapshot};

    fn two_shop_snapshot() -> StockSnapshot {
        let paris = Shop::new(ShopId::new(), "Paris");
        let lyon = Shop::new(ShopId::new(), "Lyon");
        let lamp = Article::new(ArticleId::new(), "ART-010", "Desk lamp")
            .with_category("Lighting");
        let entries = vec![
            StockEntry::new(StockEntryId::new(), paris.id, lamp.id, 150, 50, 100),
            StockEntry::new(StockEntryId::new(), lyon.id, lamp.id, 10, 30, 60),
        ];
        StockSnapshot::new(vec![paris, lyon], vec![lamp], entries)
    }

    #[tokio::test]
    async fn run_persists_every_generated_proposal() {
        let snapshots = InMemorySnapshotStore::new();
        snapshots.load(two_shop_snapshot());
        let proposals = Arc::new(InMemoryProposalStore::new());
        let service = AnalysisService::new(snapshots, proposals.clone());

        let report = service.run().await.unwrap();

        assert_eq!(report.transfer_proposals.len(), 1);
        assert_eq!(proposals.list().len(), 1);
        assert_eq!(proposals.list()[0].id, report.transfer_proposals[0].id);
    }

    #[tokio::test]
    async fn run_on_empty_snapshot_yields_an_empty_report() {
        let snapshots = InMemorySnapshotStore::new();
        let proposals = Arc::new(InMemoryProposalStore::new());
        let service = AnalysisService::new(snapshots, proposals.clone());

        let report = service.run().await.unwrap();

        assert_eq!(report.global.total_items, 0);
        assert_eq!(report.global.rupture_percentage, 0.0);
        assert!(report.transfer_proposals.is_empty());
        assert!(proposals.list().is_empty());
    }

    struct FailingSnapshotStore;

    #[async_trait]
    impl SnapshotStore for FailingSnapshotStore {
        async fn fetch_snapshot(&self) -> Result<StockSnapshot, SnapshotStoreError> {
            Err(SnapshotStoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn fetch_failure_aborts_before_writing_proposals() {
        let proposals = Arc::new(InMemoryProposalStore::new());
        let service = AnalysisService::new(FailingSnapshotStore, proposals.clone());

        let err = service.run().await.unwrap_err();

        assert!(matches!(err, AnalysisError::Fetch(_)));
        assert!(proposals.list().is_empty());
    }
}
