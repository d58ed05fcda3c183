use async_trait::async_trait;
use restock_stock::StockSnapshot;
use std::sync::RwLock;

use super::{SnapshotStore, SnapshotStoreError};

/// In-memory snapshot holder, used by the HTTP surface and by tests.
///
/// `load` replaces the snapshot wholesale. There is no partial update:
/// callers always push a complete, self-consistent picture.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<StockSnapshot>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, snapshot: StockSnapshot) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = snapshot;
    }

    pub fn is_empty(&self) -> bool {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn fetch_snapshot(&self) -> Result<StockSnapshot, SnapshotStoreError> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}
