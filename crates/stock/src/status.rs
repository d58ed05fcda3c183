use serde::{Deserialize, Serialize};

use restock_core::{ArticleId, ShopId, StockEntryId};

/// Classification of one stock row against its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    /// Below the minimum threshold.
    Rupture,
    /// Above the maximum threshold.
    Overstock,
    /// Between the thresholds (inclusive).
    Normal,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Rupture => "rupture",
            StockLevel::Overstock => "overstock",
            StockLevel::Normal => "normal",
        }
    }
}

impl core::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a stock quantity against its thresholds.
///
/// Total, deterministic, purely comparative: no validation of negative or
/// inverted (`min > max`) thresholds happens here; callers validate ranges
/// upstream. Rupture takes precedence over overstock for inverted ranges
/// where both comparisons hold.
pub fn classify(current: i64, min: i64, max: i64) -> StockLevel {
    if current < min {
        StockLevel::Rupture
    } else if current > max {
        StockLevel::Overstock
    } else {
        StockLevel::Normal
    }
}

/// Derived classification of one (shop, article) row, computed fresh each
/// analysis run. Never mutated, only recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    pub entry_id: StockEntryId,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub article_id: ArticleId,
    pub article_code: String,
    pub article_label: String,
    pub category: String,
    pub level: StockLevel,
    pub current: i64,
    pub min: i64,
    pub max: i64,
}

impl StockStatus {
    /// Units above the maximum threshold, for overstocked rows.
    pub fn excess(&self) -> Option<i64> {
        match self.level {
            StockLevel::Overstock => Some(self.current - self.max),
            _ => None,
        }
    }

    /// Units missing to reach the minimum threshold, for rupture rows.
    pub fn needed(&self) -> Option<i64> {
        match self.level {
            StockLevel::Rupture => Some(self.min - self.current),
            _ => None,
        }
    }
}
