use async_trait::async_trait;
use restock_stock::StockSnapshot;
use std::sync::Arc;
use thiserror::Error;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemorySnapshotStore;
pub use postgres::PostgresSnapshotStore;

#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot query failed: {0}")]
    Query(String),
}

/// Read-only source of the stock picture the analysis runs against.
///
/// Implementations return the whole snapshot in one call so a run never
/// observes shops, articles and entries from different points in time.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<StockSnapshot, SnapshotStoreError>;
}

#[async_trait]
impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    async fn fetch_snapshot(&self) -> Result<StockSnapshot, SnapshotStoreError> {
        (**self).fetch_snapshot().await
    }
}
