//! Item repository trait (port)

use async_trait::async_trait;
use shop_shared::types::{Page, PageRequest};

use crate::domain::{Item, ItemId};
use crate::error::DomainError;
use crate::search::{ItemSort, Predicate};

/// Catalog store. Finders without an explicit order return items in
/// insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, DomainError>;

    /// Exact name match.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, DomainError>;

    /// Name equals `name` OR detail equals `detail`.
    async fn find_by_name_or_detail(&self, name: &str, detail: &str) -> Result<Vec<Item>, DomainError>;

    /// Strictly cheaper than `price`.
    async fn find_by_price_less_than(&self, price: i32) -> Result<Vec<Item>, DomainError>;

    async fn find_by_price_less_than_order_by_price_desc(&self, price: i32) -> Result<Vec<Item>, DomainError>;

    /// Detail contains `fragment`, most expensive first.
    async fn find_by_detail_contains(&self, fragment: &str) -> Result<Vec<Item>, DomainError>;

    /// Insert when `item.id` is `None`, update otherwise. `updated_at` is
    /// refreshed on every call, `created_at` only set on insert.
    async fn save(&self, item: &Item) -> Result<Item, DomainError>;

    async fn find_filtered(
        &self,
        predicate: &Predicate,
        sort: &ItemSort,
        page: PageRequest,
    ) -> Result<Page<Item>, DomainError>;

    async fn count(&self, predicate: &Predicate) -> Result<u64, DomainError>;
}
