use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use restock_stock::{StockLevel, StockStatus};

/// Share of a category's rows that must be out of range before the category
/// as a whole is flagged.
const SIGNIFICANT_SHARE: f64 = 0.20;

/// Roll-up health of a whole category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryHealth {
    Rupture,
    Overstock,
    Normal,
    Empty,
}

/// Per-category counts and roll-up, regenerated on every analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub rupture_count: usize,
    pub overstock_count: usize,
    pub normal_count: usize,
    pub total_items: usize,
    pub overall_status: CategoryHealth,
}

/// One (shop, category) cell of the overview matrix.
///
/// Cells exist only for pairs with at least one stock row; absent cells
/// render as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub status: StockLevel,
    pub items: usize,
}

/// Shop name → category name → cell. `BTreeMap` keeps both axes sorted.
pub type ShopCategoryMatrix = BTreeMap<String, BTreeMap<String, MatrixCell>>;

/// Whole-snapshot counts and percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub total_items: usize,
    pub rupture_count: usize,
    pub overstock_count: usize,
    pub normal_count: usize,
    pub rupture_percentage: f64,
    pub overstock_percentage: f64,
    pub normal_percentage: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    rupture: usize,
    overstock: usize,
    normal: usize,
}

impl Counts {
    fn bump(&mut self, level: StockLevel) {
        match level {
            StockLevel::Rupture => self.rupture += 1,
            StockLevel::Overstock => self.overstock += 1,
            StockLevel::Normal => self.normal += 1,
        }
    }

    fn total(&self) -> usize {
        self.rupture + self.overstock + self.normal
    }
}

/// Roll-up policy for one category, applied in order, first match wins.
///
/// The "both shares significant" branch is the intended priority rule
/// (rupture wins over overstock when both cross the threshold), kept as its
/// own step even though step 3 would catch it.
fn roll_up(counts: Counts) -> CategoryHealth {
    let total = counts.total();
    if total == 0 {
        return CategoryHealth::Empty;
    }

    let rupture_share = counts.rupture as f64 / total as f64;
    let overstock_share = counts.overstock as f64 / total as f64;

    if rupture_share >= SIGNIFICANT_SHARE && overstock_share >= SIGNIFICANT_SHARE {
        return CategoryHealth::Rupture;
    }
    if rupture_share >= SIGNIFICANT_SHARE {
        return CategoryHealth::Rupture;
    }
    if overstock_share >= SIGNIFICANT_SHARE {
        return CategoryHealth::Overstock;
    }
    CategoryHealth::Normal
}

/// Fold classified rows into per-category summaries.
///
/// Output is sorted lexicographically by category name; categories with no
/// rows in the snapshot are not emitted.
pub fn summarize_categories(statuses: &[StockStatus]) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<&str, Counts> = BTreeMap::new();
    for status in statuses {
        by_category
            .entry(status.category.as_str())
            .or_default()
            .bump(status.level);
    }

    by_category
        .into_iter()
        .map(|(category, counts)| CategorySummary {
            category: category.to_string(),
            rupture_count: counts.rupture,
            overstock_count: counts.overstock,
            normal_count: counts.normal,
            total_items: counts.total(),
            overall_status: roll_up(counts),
        })
        .collect()
}

/// Build the shop × category overview matrix.
///
/// Cell status is the worst level present: rupture if any row is in rupture,
/// else overstock if any is overstocked, else normal.
pub fn shop_category_matrix(statuses: &[StockStatus]) -> ShopCategoryMatrix {
    let mut matrix: ShopCategoryMatrix = BTreeMap::new();

    for status in statuses {
        let cell = matrix
            .entry(status.shop_name.clone())
            .or_default()
            .entry(status.category.clone())
            .or_insert(MatrixCell {
                status: StockLevel::Normal,
                items: 0,
            });

        cell.items += 1;
        cell.status = match (cell.status, status.level) {
            (StockLevel::Rupture, _) | (_, StockLevel::Rupture) => StockLevel::Rupture,
            (StockLevel::Overstock, _) | (_, StockLevel::Overstock) => StockLevel::Overstock,
            _ => StockLevel::Normal,
        };
    }

    matrix
}

/// Whole-snapshot percentages; all zero when the snapshot has no rows.
pub fn global_metrics(statuses: &[StockStatus]) -> GlobalMetrics {
    let mut counts = Counts::default();
    for status in statuses {
        counts.bump(status.level);
    }

    let total = counts.total();
    let pct = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        }
    };

    GlobalMetrics {
        total_items: total,
        rupture_count: counts.rupture,
        overstock_count: counts.overstock,
        normal_count: counts.normal,
        rupture_percentage: pct(counts.rupture),
        overstock_percentage: pct(counts.overstock),
        normal_percentage: pct(counts.normal),
    }
}
