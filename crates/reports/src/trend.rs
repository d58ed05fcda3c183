use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_analysis::GlobalMetrics;

/// Global metrics captured at the end of one analysis run, kept for trend
/// reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub captured_at: DateTime<Utc>,
    pub global: GlobalMetrics,
}

/// One point of the balancing-rate evolution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Month label, e.g. "Jan 24".
    pub month: String,
    pub rupture: f64,
    pub overstock: f64,
    pub normal: f64,
}

/// Project a time-ordered sequence of run snapshots into a trend series.
///
/// Input order is preserved; callers pass snapshots sorted by capture time.
pub fn balancing_trend(snapshots: &[RunSnapshot]) -> Vec<TrendPoint> {
    snapshots
        .iter()
        .map(|snapshot| TrendPoint {
            month: snapshot.captured_at.format("%b %y").to_string(),
            rupture: snapshot.global.rupture_percentage,
            overstock: snapshot.global.overstock_percentage,
            normal: snapshot.global.normal_percentage,
        })
        .collect()
}
