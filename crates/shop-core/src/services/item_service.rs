// ============================================================================
// Shop Core - Item Service
// File: crates/shop-core/src/services/item_service.rs
// ============================================================================
//! Catalog management: create, update and load items

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Item, ItemForm, ItemId};
use crate::error::DomainError;
use crate::repositories::ItemRepository;

pub struct ItemService<R: ItemRepository + ?Sized> {
    item_repo: Arc<R>,
}

impl<R: ItemRepository + ?Sized> ItemService<R> {
    pub fn new(item_repo: Arc<R>) -> Self {
        Self { item_repo }
    }

    pub async fn create(&self, form: ItemForm) -> Result<Item, DomainError> {
        if let Err(e) = form.validate() {
            warn!("Item creation rejected: {}", e);
            return Err(e.into());
        }

        let item = Item::from_form(form)?;
        let saved = self.item_repo.save(&item).await?;

        info!(item_id = ?saved.id, "Item created");
        Ok(saved)
    }

    pub async fn update(&self, id: ItemId, form: ItemForm) -> Result<Item, DomainError> {
        // 1. Validate input
        if let Err(e) = form.validate() {
            warn!(item_id = id, "Item update rejected: {}", e);
            return Err(e.into());
        }

        // 2. Load current state
        let mut item = self.get(id).await?;

        // 3. Apply and persist
        item.apply_form(form)?;
        let saved = self.item_repo.save(&item).await?;

        info!(item_id = id, "Item updated");
        Ok(saved)
    }

    pub async fn get(&self, id: ItemId) -> Result<Item, DomainError> {
        self.item_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SellStatus;
    use crate::repositories::MockItemRepository;
    use chrono::Utc;

    fn form(name: &str, price: i32, stock: i32) -> ItemForm {
        ItemForm {
            name: name.to_string(),
            detail: "detail".to_string(),
            price,
            stock,
            sell_status: SellStatus::OnSale,
        }
    }

    fn persisted(id: ItemId) -> Item {
        let mut item = Item::new("Mug".to_string(), "Blue".to_string(), 1000, 5, SellStatus::OnSale).unwrap();
        item.id = Some(id);
        item
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let mut repo = MockItemRepository::new();
        repo.expect_save()
            .withf(|item| item.id.is_none() && item.name == "Mug")
            .times(1)
            .returning(|item| {
                let mut saved = item.clone();
                saved.id = Some(1);
                Ok(saved)
            });
        let service = ItemService::new(Arc::new(repo));

        let item = service.create(form("  Mug ", 1000, 5)).await.unwrap();
        assert_eq!(item.id, Some(1));
    }

    #[tokio::test]
    async fn test_create_reports_every_invalid_field() {
        let mut repo = MockItemRepository::new();
        repo.expect_save().never();
        let service = ItemService::new(Arc::new(repo));

        match service.create(form("", -1, -1)).await {
            Err(DomainError::ValidationFailure(fields)) => {
                assert!(fields.contains("name"));
                assert!(fields.contains("price"));
                assert!(fields.contains("stock"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save().never();
        let service = ItemService::new(Arc::new(repo));

        let result = service.update(42, form("Mug", 1, 1)).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_saves_new_values() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id().returning(|id| Ok(Some(persisted(id))));
        repo.expect_save()
            .withf(|item| item.id == Some(3) && item.price == 2500 && item.stock == 0)
            .times(1)
            .returning(|item| {
                let mut saved = item.clone();
                saved.updated_at = Utc::now();
                Ok(saved)
            });
        let service = ItemService::new(Arc::new(repo));

        let mut sold_out = form("Mug", 2500, 0);
        sold_out.sell_status = SellStatus::SoldOut;
        let item = service.update(3, sold_out).await.unwrap();
        assert_eq!(item.sell_status, SellStatus::SoldOut);
    }
}
