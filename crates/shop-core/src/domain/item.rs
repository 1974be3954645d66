// ============================================================================
// Shop Core - Item Entity
// File: crates/shop-core/src/domain/item.rs
// Description: Catalog item and its sell status
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rules::not_blank;

pub type ItemId = i64;

/// Sell status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellStatus {
    #[serde(alias = "SELL")]
    OnSale,
    SoldOut,
}

impl SellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SellStatus::OnSale => "ON_SALE",
            SellStatus::SoldOut => "SOLD_OUT",
        }
    }

    /// Accepts the legacy `SELL` spelling as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ON_SALE" | "SELL" => Some(SellStatus::OnSale),
            "SOLD_OUT" => Some(SellStatus::SoldOut),
            _ => None,
        }
    }
}

impl Default for SellStatus {
    fn default() -> Self {
        SellStatus::OnSale
    }
}

/// Catalog item. `id` is `None` until the item has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<ItemId>,

    #[validate(
        custom(function = "not_blank", message = "Item name is required."),
        length(max = 50, message = "Item name must be at most 50 characters.")
    )]
    pub name: String,

    pub detail: String,

    #[validate(range(min = 0, message = "Price must not be negative."))]
    pub price: i32,

    #[validate(range(min = 0, message = "Stock must not be negative."))]
    pub stock: i32,

    pub sell_status: SellStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new, unsaved item
    pub fn new(
        name: String,
        detail: String,
        price: i32,
        stock: i32,
        sell_status: SellStatus,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let item = Self {
            id: None,
            name: name.trim().to_string(),
            detail,
            price,
            stock,
            sell_status,
            created_at: now,
            updated_at: now,
        };

        item.validate()?;
        Ok(item)
    }

    pub fn from_form(form: ItemForm) -> Result<Self, validator::ValidationErrors> {
        form.validate()?;
        Self::new(form.name, form.detail, form.price, form.stock, form.sell_status)
    }

    /// Overwrite the editable fields. Timestamps are left to the store.
    pub fn apply_form(&mut self, form: ItemForm) -> Result<(), validator::ValidationErrors> {
        form.validate()?;
        self.name = form.name.trim().to_string();
        self.detail = form.detail;
        self.price = form.price;
        self.stock = form.stock;
        self.sell_status = form.sell_status;
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_on_sale(&self) -> bool {
        self.sell_status == SellStatus::OnSale
    }
}

/// Editable item fields, as submitted by catalog management.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    #[validate(
        custom(function = "not_blank", message = "Item name is required."),
        length(max = 50, message = "Item name must be at most 50 characters.")
    )]
    pub name: String,

    #[serde(default)]
    pub detail: String,

    #[validate(range(min = 0, message = "Price must not be negative."))]
    pub price: i32,

    #[validate(range(min = 0, message = "Stock must not be negative."))]
    pub stock: i32,

    #[serde(default)]
    pub sell_status: SellStatus,
}
