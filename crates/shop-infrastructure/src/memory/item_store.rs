use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use shop_core::domain::{Item, ItemId};
use shop_core::error::DomainError;
use shop_core::repositories::ItemRepository;
use shop_core::search::{ItemSort, Predicate};
use shop_shared::types::{Page, PageRequest};

#[derive(Default)]
struct ItemTable {
    last_id: ItemId,
    // keyed by id, so iteration is insertion order
    rows: BTreeMap<ItemId, Item>,
}

#[derive(Default)]
pub struct InMemoryItemRepository {
    table: RwLock<ItemTable>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect<F>(&self, keep: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.table
            .read()
            .rows
            .values()
            .filter(|item| keep(item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, DomainError> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, DomainError> {
        Ok(self.collect(|item| item.name == name))
    }

    async fn find_by_name_or_detail(&self, name: &str, detail: &str) -> Result<Vec<Item>, DomainError> {
        Ok(self.collect(|item| item.name == name || item.detail == detail))
    }

    async fn find_by_price_less_than(&self, price: i32) -> Result<Vec<Item>, DomainError> {
        Ok(self.collect(|item| item.price < price))
    }

    async fn find_by_price_less_than_order_by_price_desc(&self, price: i32) -> Result<Vec<Item>, DomainError> {
        let mut items = self.collect(|item| item.price < price);
        let sort = ItemSort::price_desc().with_tiebreaker();
        items.sort_by(|a, b| sort.compare(a, b));
        Ok(items)
    }

    async fn find_by_detail_contains(&self, fragment: &str) -> Result<Vec<Item>, DomainError> {
        let mut items = self.collect(|item| item.detail.contains(fragment));
        let sort = ItemSort::price_desc().with_tiebreaker();
        items.sort_by(|a, b| sort.compare(a, b));
        Ok(items)
    }

    async fn save(&self, item: &Item) -> Result<Item, DomainError> {
        let mut table = self.table.write();
        let now = Utc::now();

        let saved = match item.id {
            None => {
                table.last_id += 1;
                let mut saved = item.clone();
                saved.id = Some(table.last_id);
                saved.created_at = now;
                saved.updated_at = now;
                saved
            }
            Some(id) => {
                let existing = table
                    .rows
                    .get(&id)
                    .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
                let mut saved = item.clone();
                saved.created_at = existing.created_at;
                saved.updated_at = now.max(existing.updated_at);
                saved
            }
        };

        if let Some(id) = saved.id {
            table.rows.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn find_filtered(
        &self,
        predicate: &Predicate,
        sort: &ItemSort,
        page: PageRequest,
    ) -> Result<Page<Item>, DomainError> {
        let mut matching = self.collect(|item| predicate.matches(item));
        matching.sort_by(|a, b| sort.compare(a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content: Vec<Item> = matching
            .into_iter()
            .skip(offset)
            .take(page.size() as usize)
            .collect();

        Ok(Page::new(content, total, page))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DomainError> {
        let table = self.table.read();
        Ok(table.rows.values().filter(|item| predicate.matches(item)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::domain::SellStatus;

    async fn create_item_list(repo: &InMemoryItemRepository) {
        for i in 1..=10 {
            let item = Item::new(
                format!("Test item{}", i),
                format!("Test item detail{}", i),
                10000 + i,
                100,
                SellStatus::OnSale,
            )
            .unwrap();
            repo.save(&item).await.unwrap();
        }
    }

    fn prices(items: &[Item]) -> Vec<i32> {
        items.iter().map(|i| i.price).collect()
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        assert_eq!(repo.len(), 10);
        let first = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(first.name, "Test item1");
        assert!(repo.find_by_id(11).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_updates_existing_and_refreshes_timestamp() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;

        let mut item = repo.find_by_id(3).await.unwrap().unwrap();
        let created_at = item.created_at;
        let updated_at = item.updated_at;
        item.stock = 0;
        item.sell_status = SellStatus::SoldOut;
        item.created_at = Utc::now() + chrono::Duration::days(1);

        let saved = repo.save(&item).await.unwrap();
        assert_eq!(saved.id, Some(3));
        assert_eq!(saved.created_at, created_at);
        assert!(saved.updated_at >= updated_at);
        assert_eq!(repo.len(), 10);
        assert_eq!(repo.find_by_id(3).await.unwrap().unwrap().sell_status, SellStatus::SoldOut);
    }

    #[tokio::test]
    async fn test_save_unknown_id_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let mut item = Item::new("x".into(), String::new(), 1, 1, SellStatus::OnSale).unwrap();
        item.id = Some(99);
        assert!(matches!(repo.save(&item).await, Err(DomainError::NotFound(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        let items = repo.find_by_name("Test item1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 10001);
    }

    #[tokio::test]
    async fn test_find_by_name_or_detail() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        let items = repo
            .find_by_name_or_detail("Test item1", "Test item detail5")
            .await
            .unwrap();
        assert_eq!(prices(&items), vec![10001, 10005]);
    }

    #[tokio::test]
    async fn test_find_by_price_less_than_is_strict() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        let items = repo.find_by_price_less_than(10005).await.unwrap();
        assert_eq!(prices(&items), vec![10001, 10002, 10003, 10004]);

        let items = repo.find_by_price_less_than_order_by_price_desc(10005).await.unwrap();
        assert_eq!(prices(&items), vec![10004, 10003, 10002, 10001]);
    }

    #[tokio::test]
    async fn test_find_by_detail_contains_orders_by_price_desc() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        let items = repo.find_by_detail_contains("Test item detail").await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0].price, 10010);
        assert_eq!(items[9].price, 10001);

        assert!(repo.find_by_detail_contains("test item detail").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_uses_predicate() {
        let repo = InMemoryItemRepository::new();
        create_item_list(&repo).await;
        let predicate = Predicate::all().and(shop_core::search::Condition::PriceGreaterThan(10007));
        assert_eq!(repo.count(&predicate).await.unwrap(), 3);
        assert_eq!(repo.count(&Predicate::all()).await.unwrap(), 10);
    }
}
