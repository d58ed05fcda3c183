use serde::{Deserialize, Serialize};

use restock_core::{ArticleId, Entity, ShopId, StockEntryId};

/// One (shop, article) stock row with its min/max thresholds.
///
/// Created and updated by inventory operations outside the core; consumed
/// read-only here. `min <= max` is expected but not guaranteed by the source
/// data, see [`StockEntry::has_inverted_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: StockEntryId,
    pub shop_id: ShopId,
    pub article_id: ArticleId,
    pub current: i64,
    pub min: i64,
    pub max: i64,
}

impl StockEntry {
    pub fn new(
        id: StockEntryId,
        shop_id: ShopId,
        article_id: ArticleId,
        current: i64,
        min: i64,
        max: i64,
    ) -> Self {
        Self {
            id,
            shop_id,
            article_id,
            current,
            min,
            max,
        }
    }

    /// True when the thresholds are inverted (`min > max`).
    ///
    /// Such rows are still classified (the classifier is purely comparative)
    /// but are flagged on the snapshot so operators can fix the source data.
    pub fn has_inverted_range(&self) -> bool {
        self.min > self.max
    }
}

impl Entity for StockEntry {
    type Id = StockEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
