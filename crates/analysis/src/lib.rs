//! Stock-rebalancing analysis engine.
//!
//! Consumes one immutable [`restock_stock::StockSnapshot`], classifies every
//! stock row, aggregates category/shop health views and derives matched
//! transfer proposals. Everything here is deterministic domain logic; the
//! snapshot fetch and proposal persistence live in `restock-infra`.

pub mod aggregate;
pub mod matcher;
pub mod report;

pub use aggregate::{
    global_metrics, shop_category_matrix, summarize_categories, CategoryHealth, CategorySummary,
    GlobalMetrics, MatrixCell, ShopCategoryMatrix,
};
pub use matcher::{match_transfers, partition, OverstockedItem, UnderstockedItem};
pub use report::{run_analysis, AnalysisReport};
