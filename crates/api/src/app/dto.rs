//! Request/response DTOs and mapping into domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use restock_catalog::{Article, Shop};
use restock_core::{ArticleId, DomainError, ShopId, StockEntryId};
use restock_stock::{StockEntry, StockSnapshot};

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub shops: Vec<ShopPayload>,
    pub articles: Vec<ArticlePayload>,
    pub entries: Vec<StockEntryPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ShopPayload {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    pub id: Uuid,
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StockEntryPayload {
    /// Omitted ids are generated server-side.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub shop_id: Uuid,
    pub article_id: Uuid,
    pub current: i64,
    pub min: i64,
    pub max: i64,
}

impl SnapshotRequest {
    /// Map the payload into a domain snapshot.
    ///
    /// Quantities must be non-negative; inverted `min > max` ranges are
    /// accepted here and flagged later by classification.
    pub fn into_snapshot(self) -> Result<StockSnapshot, DomainError> {
        let shops = self
            .shops
            .into_iter()
            .map(|shop| {
                let mut mapped = Shop::new(ShopId::from_uuid(shop.id), shop.name);
                if let Some(address) = shop.address {
                    mapped = mapped.with_address(address);
                }
                mapped
            })
            .collect();

        let articles = self
            .articles
            .into_iter()
            .map(|article| {
                let mut mapped =
                    Article::new(ArticleId::from_uuid(article.id), article.code, article.label);
                if let Some(brand) = article.brand {
                    mapped = mapped.with_brand(brand);
                }
                if let Some(category) = article.category {
                    mapped = mapped.with_category(category);
                }
                if let Some(sub_category) = article.sub_category {
                    mapped = mapped.with_sub_category(sub_category);
                }
                mapped
            })
            .collect();

        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            if entry.current < 0 || entry.min < 0 || entry.max < 0 {
                return Err(DomainError::validation(format!(
                    "stock quantities must be non-negative (shop {}, article {})",
                    entry.shop_id, entry.article_id
                )));
            }
            let id = entry
                .id
                .map(StockEntryId::from_uuid)
                .unwrap_or_else(StockEntryId::new);
            entries.push(StockEntry::new(
                id,
                ShopId::from_uuid(entry.shop_id),
                ArticleId::from_uuid(entry.article_id),
                entry.current,
                entry.min,
                entry.max,
            ));
        }

        Ok(StockSnapshot::new(shops, articles, entries))
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotLoadedResponse {
    pub shops: usize,
    pub articles: usize,
    pub entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProposalListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferHistoryQuery {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}
