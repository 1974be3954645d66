//! Sort orders over item fields

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shop_shared::types::SortDirection;

use crate::domain::Item;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSortField {
    Id,
    Name,
    Price,
    Stock,
    CreatedAt,
    UpdatedAt,
}

impl ItemSortField {
    pub fn as_column(&self) -> &'static str {
        match self {
            ItemSortField::Id => "id",
            ItemSortField::Name => "name",
            ItemSortField::Price => "price",
            ItemSortField::Stock => "stock",
            ItemSortField::CreatedAt => "created_at",
            ItemSortField::UpdatedAt => "updated_at",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "id" => Some(ItemSortField::Id),
            "name" => Some(ItemSortField::Name),
            "price" => Some(ItemSortField::Price),
            "stock" => Some(ItemSortField::Stock),
            "createdAt" | "created_at" => Some(ItemSortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(ItemSortField::UpdatedAt),
            _ => None,
        }
    }

    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            ItemSortField::Id => a.id.cmp(&b.id),
            ItemSortField::Name => a.name.cmp(&b.name),
            ItemSortField::Price => a.price.cmp(&b.price),
            ItemSortField::Stock => a.stock.cmp(&b.stock),
            ItemSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            ItemSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: ItemSortField,
    pub direction: SortDirection,
}

/// Ordered list of sort keys. No keys means insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSort {
    orders: Vec<SortOrder>,
}

impl ItemSort {
    pub fn insertion_order() -> Self {
        Self::default()
    }

    pub fn by(field: ItemSortField, direction: SortDirection) -> Self {
        Self::default().then(field, direction)
    }

    pub fn price_desc() -> Self {
        Self::by(ItemSortField::Price, SortDirection::Desc)
    }

    pub fn then(mut self, field: ItemSortField, direction: SortDirection) -> Self {
        self.orders.push(SortOrder { field, direction });
        self
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Appends `id ASC` unless id is already a key, so equal keys keep
    /// insertion order and pages never overlap.
    pub fn with_tiebreaker(mut self) -> Self {
        if !self.orders.iter().any(|o| o.field == ItemSortField::Id) {
            self.orders.push(SortOrder {
                field: ItemSortField::Id,
                direction: SortDirection::Asc,
            });
        }
        self
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        for order in &self.orders {
            let ordering = match order.direction {
                SortDirection::Asc => order.field.compare(a, b),
                SortDirection::Desc => order.field.compare(b, a),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    }

    /// Parses `field[,dir]` keys separated by `;`, e.g. `price,desc;name`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let mut sort = Self::default();
        for key in input.split(';').map(str::trim).filter(|k| !k.is_empty()) {
            let mut parts = key.splitn(2, ',');
            let field_name = parts.next().unwrap_or_default();
            let field = ItemSortField::from_str(field_name).ok_or_else(|| {
                DomainError::InvalidArgument(format!("unknown sort field: {}", field_name))
            })?;
            let direction = match parts.next() {
                Some(dir) => SortDirection::from_str(dir).ok_or_else(|| {
                    DomainError::InvalidArgument(format!("unknown sort direction: {}", dir.trim()))
                })?,
                None => SortDirection::Asc,
            };
            sort = sort.then(field, direction);
        }
        Ok(sort)
    }
}
