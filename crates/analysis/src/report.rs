use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::StockEntryId;
use restock_stock::StockSnapshot;
use restock_transfers::TransferProposal;

use crate::aggregate::{
    global_metrics, shop_category_matrix, summarize_categories, CategorySummary, GlobalMetrics,
    ShopCategoryMatrix,
};
use crate::matcher::{match_transfers, partition, OverstockedItem, UnderstockedItem};

/// Everything one analysis run produces for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub category_summaries: Vec<CategorySummary>,
    pub shop_category_matrix: ShopCategoryMatrix,
    pub global: GlobalMetrics,
    pub overstocked_items: Vec<OverstockedItem>,
    pub understocked_items: Vec<UnderstockedItem>,
    pub transfer_proposals: Vec<TransferProposal>,
    /// Entries skipped because their shop or article is unknown.
    pub orphaned_entries: Vec<StockEntryId>,
    /// Entries with `min > max`, classified as-is but needing data cleanup.
    pub range_warnings: Vec<StockEntryId>,
}

/// Run the full analysis over one immutable snapshot.
///
/// Classification, aggregation and matching are synchronous and side-effect
/// free; persisting the resulting proposals is the caller's concern.
pub fn run_analysis(snapshot: &StockSnapshot, generated_at: DateTime<Utc>) -> AnalysisReport {
    let classified = snapshot.classify();
    let (overstocked_items, understocked_items) = partition(&classified.statuses);
    let transfer_proposals = match_transfers(&overstocked_items, &understocked_items, generated_at);

    AnalysisReport {
        generated_at,
        category_summaries: summarize_categories(&classified.statuses),
        shop_category_matrix: shop_category_matrix(&classified.statuses),
        global: global_metrics(&classified.statuses),
        overstocked_items,
        understocked_items,
        transfer_proposals,
        orphaned_entries: classified.orphaned_entries,
        range_warnings: classified.range_warnings,
    }
}
