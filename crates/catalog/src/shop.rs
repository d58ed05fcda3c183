use serde::{Deserialize, Serialize};

use restock_core::{Entity, ShopId};

/// A point of sale holding stock.
///
/// Created/edited by store management outside the core; immutable for the
/// duration of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub address: Option<String>,
}

impl Shop {
    pub fn new(id: ShopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl Entity for Shop {
    type Id = ShopId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
