use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use restock_stock::{StockLevel, StockStatus};

/// Per-shop share of rupture/overstock/normal rows, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopPerformance {
    pub shop_name: String,
    pub rupture_rate: f64,
    pub overstock_rate: f64,
    pub normal_rate: f64,
}

/// Compute each shop's rates from one run's classified rows.
///
/// Output is sorted by shop name; shops with no rows are absent.
pub fn shop_performance(statuses: &[StockStatus]) -> Vec<ShopPerformance> {
    let mut by_shop: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();

    for status in statuses {
        let counts = by_shop.entry(status.shop_name.as_str()).or_default();
        match status.level {
            StockLevel::Rupture => counts.0 += 1,
            StockLevel::Overstock => counts.1 += 1,
            StockLevel::Normal => counts.2 += 1,
        }
    }

    by_shop
        .into_iter()
        .map(|(shop_name, (rupture, overstock, normal))| {
            let total = (rupture + overstock + normal) as f64;
            ShopPerformance {
                shop_name: shop_name.to_string(),
                rupture_rate: rupture as f64 / total * 100.0,
                overstock_rate: overstock as f64 / total * 100.0,
                normal_rate: normal as f64 / total * 100.0,
            }
        })
        .collect()
}
