use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use restock_catalog::{Article, Shop};
use restock_core::{ArticleId, ShopId, StockEntryId};

use crate::entry::StockEntry;
use crate::status::{classify, StockStatus};

/// The full read of shops, articles and stock entries used as input to one
/// analysis run.
///
/// A snapshot is immutable for the duration of the run: the fetch phase reads
/// all three collections before any computation starts, and concurrent runs
/// each hold their own snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StockSnapshot {
    pub shops: Vec<Shop>,
    pub articles: Vec<Article>,
    pub entries: Vec<StockEntry>,
}

/// Output of joining + classifying a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStock {
    /// One record per resolvable stock row, in snapshot order.
    pub statuses: Vec<StockStatus>,
    /// Entries referencing an unknown shop or article; skipped from analysis.
    pub orphaned_entries: Vec<StockEntryId>,
    /// Entries with `min > max`; classified as-is but flagged for follow-up.
    pub range_warnings: Vec<StockEntryId>,
}

impl StockSnapshot {
    pub fn new(shops: Vec<Shop>, articles: Vec<Article>, entries: Vec<StockEntry>) -> Self {
        Self {
            shops,
            articles,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Join every stock row against its shop and article and classify it.
    ///
    /// Rows that reference an unknown shop or article cannot be rendered or
    /// matched, so they are dropped and reported in `orphaned_entries`.
    /// Inverted-range rows are kept (classification is purely comparative)
    /// and reported in `range_warnings`.
    pub fn classify(&self) -> ClassifiedStock {
        let shops: HashMap<ShopId, &Shop> = self.shops.iter().map(|s| (s.id, s)).collect();
        let articles: HashMap<ArticleId, &Article> =
            self.articles.iter().map(|a| (a.id, a)).collect();

        let mut statuses = Vec::with_capacity(self.entries.len());
        let mut orphaned_entries = Vec::new();
        let mut range_warnings = Vec::new();

        for entry in &self.entries {
            let (shop, article) = match (shops.get(&entry.shop_id), articles.get(&entry.article_id))
            {
                (Some(shop), Some(article)) => (*shop, *article),
                _ => {
                    orphaned_entries.push(entry.id);
                    continue;
                }
            };

            if entry.has_inverted_range() {
                range_warnings.push(entry.id);
            }

            statuses.push(StockStatus {
                entry_id: entry.id,
                shop_id: shop.id,
                shop_name: shop.name.clone(),
                article_id: article.id,
                article_code: article.code.clone(),
                article_label: article.label.clone(),
                category: article.category_label().to_string(),
                level: classify(entry.current, entry.min, entry.max),
                current: entry.current,
                min: entry.min,
                max: entry.max,
            });
        }

        ClassifiedStock {
            statuses,
            orphaned_entries,
            range_warnings,
        }
    }
}
