use serde::{Deserialize, Serialize};

use restock_core::{ArticleId, Entity};

/// Category label used when an article carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A catalog article.
///
/// `code` is the unique business key; `category` drives aggregation and is
/// optional (absent maps to [`UNCATEGORIZED`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub code: String,
    pub label: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

impl Article {
    pub fn new(id: ArticleId, code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            label: label.into(),
            brand: None,
            category: None,
            sub_category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Category label for aggregation; absent categories collapse into one bucket.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

impl Entity for Article {
    type Id = ArticleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
