//! Storage adapters and orchestration for the restock analysis engine.

pub mod analysis_service;
pub mod proposal_store;
pub mod snapshot_store;

pub use analysis_service::{AnalysisError, AnalysisService};
pub use proposal_store::{InMemoryProposalStore, ProposalStore, ProposalStoreError};
pub use snapshot_store::{
    InMemorySnapshotStore, PostgresSnapshotStore, SnapshotStore, SnapshotStoreError,
};
