//! Report projection layer.
//!
//! Pure formatting over analysis outputs and proposal history: the
//! balancing-rate trend series, filtered transfer history and per-shop
//! performance rates. Rendering/export (tables, Excel, PDF) happens outside
//! the core; this crate only shapes the data.

pub mod history;
pub mod shop_performance;
pub mod trend;

pub use history::{filter_history, HistoryFilter, PeriodFilter, TransferRecord};
pub use shop_performance::{shop_performance, ShopPerformance};
pub use trend::{balancing_trend, RunSnapshot, TrendPoint};
