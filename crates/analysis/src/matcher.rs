use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{ArticleId, ProposalId, ShopId};
use restock_stock::{StockLevel, StockStatus};
use restock_transfers::{TransferProposal, TransferStatus};

/// One overstocked (shop, article) row: supply for the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverstockedItem {
    pub article_id: ArticleId,
    pub article_label: String,
    pub category: String,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub current: i64,
    pub max: i64,
    /// `current - max`, always > 0.
    pub excess: i64,
}

/// One understocked (shop, article) row: demand for the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderstockedItem {
    pub article_id: ArticleId,
    pub article_label: String,
    pub category: String,
    pub shop_id: ShopId,
    pub shop_name: String,
    pub current: i64,
    pub min: i64,
    /// `min - current`, always > 0.
    pub needed: i64,
}

/// Split classified rows into matcher supply and demand, in snapshot order.
pub fn partition(statuses: &[StockStatus]) -> (Vec<OverstockedItem>, Vec<UnderstockedItem>) {
    let mut overstocked = Vec::new();
    let mut understocked = Vec::new();

    for status in statuses {
        match status.level {
            StockLevel::Overstock => overstocked.push(OverstockedItem {
                article_id: status.article_id,
                article_label: status.article_label.clone(),
                category: status.category.clone(),
                shop_id: status.shop_id,
                shop_name: status.shop_name.clone(),
                current: status.current,
                max: status.max,
                excess: status.current - status.max,
            }),
            StockLevel::Rupture => understocked.push(UnderstockedItem {
                article_id: status.article_id,
                article_label: status.article_label.clone(),
                category: status.category.clone(),
                shop_id: status.shop_id,
                shop_name: status.shop_name.clone(),
                current: status.current,
                min: status.min,
                needed: status.min - status.current,
            }),
            StockLevel::Normal => {}
        }
    }

    (overstocked, understocked)
}

/// Greedy per-article matching of excess supply against unmet demand.
///
/// Deterministic policy:
/// - articles are visited in id order;
/// - understocked shops are visited in shop name ascending order;
/// - each is paired one-to-one with the unused overstocked shop holding the
///   largest excess, ties broken by shop name ascending;
/// - `quantity = min(excess, needed)`;
/// - when an article's sources run out, the remaining understocked shops get
///   no proposal this run, and articles present on only one side produce
///   nothing.
///
/// Re-running on an unchanged snapshot yields the same pairings and
/// quantities (ids and timestamps excepted).
pub fn match_transfers(
    overstocked: &[OverstockedItem],
    understocked: &[UnderstockedItem],
    now: DateTime<Utc>,
) -> Vec<TransferProposal> {
    let mut supply_by_article: BTreeMap<ArticleId, Vec<&OverstockedItem>> = BTreeMap::new();
    for item in overstocked {
        supply_by_article.entry(item.article_id).or_default().push(item);
    }

    let mut demand_by_article: BTreeMap<ArticleId, Vec<&UnderstockedItem>> = BTreeMap::new();
    for item in understocked {
        demand_by_article.entry(item.article_id).or_default().push(item);
    }

    let mut proposals = Vec::new();

    for (article_id, mut demand) in demand_by_article {
        let Some(mut supply) = supply_by_article.remove(&article_id) else {
            continue;
        };

        demand.sort_by(|a, b| a.shop_name.cmp(&b.shop_name));
        supply.sort_by(|a, b| b.excess.cmp(&a.excess).then(a.shop_name.cmp(&b.shop_name)));

        let mut sources = supply.into_iter();
        for destination in demand {
            let Some(source) = sources.next() else {
                break;
            };

            let quantity = source.excess.min(destination.needed);
            proposals.push(TransferProposal {
                id: ProposalId::new(),
                article_id,
                article_label: source.article_label.clone(),
                category: source.category.clone(),
                source_shop_id: source.shop_id,
                source_shop_name: source.shop_name.clone(),
                destination_shop_id: destination.shop_id,
                destination_shop_name: destination.shop_name.clone(),
                quantity,
                reason: format!(
                    "overstock at {}, shortage at {}",
                    source.shop_name, destination.shop_name
                ),
                status: TransferStatus::Proposed,
                proposed_at: now,
                updated_at: now,
            });
        }
    }

    proposals
}
