//! Postgres-backed snapshot store.
//!
//! Reads the catalog and stock tables maintained by the inventory side of the
//! system. Expected schema:
//!
//! ```sql
//! shops         (id UUID PK, name TEXT, address TEXT NULL)
//! articles      (id UUID PK, code TEXT, label TEXT,
//!                brand TEXT NULL, category TEXT NULL, sub_category TEXT NULL)
//! stock_entries (id UUID PK, shop_id UUID, article_id UUID,
//!                current_qty BIGINT, min_qty BIGINT, max_qty BIGINT)
//! ```

use async_trait::async_trait;
use restock_catalog::{Article, Shop};
use restock_core::{ArticleId, ShopId, StockEntryId};
use restock_stock::{StockEntry, StockSnapshot};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{SnapshotStore, SnapshotStoreError};

pub struct PostgresSnapshotStore {
    pool: PgPool,
}

impl PostgresSnapshotStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_err(e: sqlx::Error) -> SnapshotStoreError {
    SnapshotStoreError::Query(e.to_string())
}

#[async_trait]
impl SnapshotStore for PostgresSnapshotStore {
    /// Fetches shops, articles and stock entries inside one transaction so
    /// the three result sets describe the same point in time.
    async fn fetch_snapshot(&self) -> Result<StockSnapshot, SnapshotStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SnapshotStoreError::Unavailable(e.to_string()))?;

        let shop_rows = sqlx::query("SELECT id, name, address FROM shops")
            .fetch_all(&mut *tx)
            .await
            .map_err(query_err)?;
        let mut shops = Vec::with_capacity(shop_rows.len());
        for row in shop_rows {
            let id: Uuid = row.try_get("id").map_err(query_err)?;
            let name: String = row.try_get("name").map_err(query_err)?;
            let address: Option<String> = row.try_get("address").map_err(query_err)?;
            let mut shop = Shop::new(ShopId::from_uuid(id), name);
            if let Some(address) = address {
                shop = shop.with_address(address);
            }
            shops.push(shop);
        }

        let article_rows = sqlx::query(
            "SELECT id, code, label, brand, category, sub_category FROM articles",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(query_err)?;
        let mut articles = Vec::with_capacity(article_rows.len());
        for row in article_rows {
            let id: Uuid = row.try_get("id").map_err(query_err)?;
            let code: String = row.try_get("code").map_err(query_err)?;
            let label: String = row.try_get("label").map_err(query_err)?;
            let mut article = Article::new(ArticleId::from_uuid(id), code, label);
            if let Some(brand) = row.try_get::<Option<String>, _>("brand").map_err(query_err)? {
                article = article.with_brand(brand);
            }
            if let Some(category) = row
                .try_get::<Option<String>, _>("category")
                .map_err(query_err)?
            {
                article = article.with_category(category);
            }
            if let Some(sub_category) = row
                .try_get::<Option<String>, _>("sub_category")
                .map_err(query_err)?
            {
                article = article.with_sub_category(sub_category);
            }
            articles.push(article);
        }

        let entry_rows = sqlx::query(
            "SELECT id, shop_id, article_id, current_qty, min_qty, max_qty FROM stock_entries",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(query_err)?;
        let mut entries = Vec::with_capacity(entry_rows.len());
        for row in entry_rows {
            let id: Uuid = row.try_get("id").map_err(query_err)?;
            let shop_id: Uuid = row.try_get("shop_id").map_err(query_err)?;
            let article_id: Uuid = row.try_get("article_id").map_err(query_err)?;
            let current: i64 = row.try_get("current_qty").map_err(query_err)?;
            let min: i64 = row.try_get("min_qty").map_err(query_err)?;
            let max: i64 = row.try_get("max_qty").map_err(query_err)?;
            entries.push(StockEntry::new(
                StockEntryId::from_uuid(id),
                ShopId::from_uuid(shop_id),
                ArticleId::from_uuid(article_id),
                current,
                min,
                max,
            ));
        }

        tx.commit()
            .await
            .map_err(|e| SnapshotStoreError::Unavailable(e.to_string()))?;

        Ok(StockSnapshot::new(shops, articles, entries))
    }
}
