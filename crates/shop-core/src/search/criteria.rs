//! Search criteria submitted by a catalog search request

use serde::{Deserialize, Serialize};

use crate::domain::SellStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchCriteria {
    pub detail_contains: Option<String>,
    pub min_price: Option<i32>,
    pub sell_status: Option<SellStatus>,
}

impl ItemSearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detail_contains(mut self, fragment: impl Into<String>) -> Self {
        self.detail_contains = Some(fragment.into());
        self
    }

    pub fn min_price(mut self, price: i32) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn sell_status(mut self, status: SellStatus) -> Self {
        self.sell_status = Some(status);
        self
    }
}
