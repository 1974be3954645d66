// ============================================================================
// Shop Infrastructure - PostgreSQL Item Repository
// File: crates/shop-infrastructure/src/database/postgres/item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use shop_core::domain::{Item, ItemId, SellStatus};
use shop_core::error::DomainError;
use shop_core::repositories::ItemRepository;
use shop_core::search::{ItemSort, Predicate};
use shop_shared::types::{Page, PageRequest};

use super::filter::{push_order_by, push_page, push_predicate};
use crate::database::policy::{storage_failure, StorePolicy};

const SELECT_ITEM: &str =
    "SELECT id, name, detail, price, stock, sell_status, created_at, updated_at FROM item";

pub struct PgItemRepository {
    pool: PgPool,
    policy: StorePolicy,
}

impl PgItemRepository {
    pub fn new(pool: PgPool, policy: StorePolicy) -> Self {
        Self { pool, policy }
    }

    async fn insert(&self, item: &Item) -> Result<Item, DomainError> {
        let row: ItemRow = self
            .policy
            .write(
                "insert_item",
                sqlx::query_as::<_, ItemRow>(
                    r#"
                    INSERT INTO item (name, detail, price, stock, sell_status, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
                    RETURNING id, name, detail, price, stock, sell_status, created_at, updated_at
                    "#,
                )
                .bind(&item.name)
                .bind(&item.detail)
                .bind(item.price)
                .bind(item.stock)
                .bind(item.sell_status.as_str())
                .fetch_one(&self.pool),
            )
            .await
            .map_err(|e| storage_failure("insert_item", e))?;

        info!("Item created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: ItemId, item: &Item) -> Result<Item, DomainError> {
        let row: Option<ItemRow> = self
            .policy
            .write(
                "update_item",
                sqlx::query_as::<_, ItemRow>(
                    r#"
                    UPDATE item
                    SET
                        name = $2,
                        detail = $3,
                        price = $4,
                        stock = $5,
                        sell_status = $6,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, name, detail, price, stock, sell_status, created_at, updated_at
                    "#,
                )
                .bind(id)
                .bind(&item.name)
                .bind(&item.detail)
                .bind(item.price)
                .bind(item.stock)
                .bind(item.sell_status.as_str())
                .fetch_optional(&self.pool),
            )
            .await
            .map_err(|e| storage_failure("update_item", e))?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                warn!("Update of missing item {}", id);
                Err(DomainError::NotFound(format!("item {}", id)))
            }
        }
    }

    async fn fetch_list(
        &self,
        op: &'static str,
        sql: &'static str,
        bind: ListBind<'_>,
    ) -> Result<Vec<Item>, DomainError> {
        let pool = &self.pool;
        let rows: Vec<ItemRow> = self
            .policy
            .read(op, move || {
                let query = sqlx::query_as::<_, ItemRow>(sql);
                let query = match bind {
                    ListBind::Text(a) => query.bind(a),
                    ListBind::TextPair(a, b) => query.bind(a).bind(b),
                    ListBind::Int(a) => query.bind(a),
                };
                query.fetch_all(pool)
            })
            .await?;

        debug!(op, rows = rows.len(), "Item list fetched");
        Ok(rows.into_iter().map(Item::from).collect())
    }
}

#[derive(Clone, Copy)]
enum ListBind<'a> {
    Text(&'a str),
    TextPair(&'a str, &'a str),
    Int(i32),
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ItemRow {
    pub id: i64,
    pub name: String,
    pub detail: String,
    pub price: i32,
    pub stock: i32,
    pub sell_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: Some(row.id),
            name: row.name,
            detail: row.detail,
            price: row.price,
            stock: row.stock,
            sell_status: SellStatus::from_str(&row.sell_status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, DomainError> {
        let pool = &self.pool;
        let row: Option<ItemRow> = self
            .policy
            .read("find_item_by_id", move || {
                sqlx::query_as::<_, ItemRow>(
                    r#"
                    SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
                    FROM item
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .fetch_optional(pool)
            })
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, DomainError> {
        self.fetch_list(
            "find_items_by_name",
            r#"
            SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
            FROM item
            WHERE name = $1
            ORDER BY id
            "#,
            ListBind::Text(name),
        )
        .await
    }

    async fn find_by_name_or_detail(&self, name: &str, detail: &str) -> Result<Vec<Item>, DomainError> {
        self.fetch_list(
            "find_items_by_name_or_detail",
            r#"
            SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
            FROM item
            WHERE name = $1 OR detail = $2
            ORDER BY id
            "#,
            ListBind::TextPair(name, detail),
        )
        .await
    }

    async fn find_by_price_less_than(&self, price: i32) -> Result<Vec<Item>, DomainError> {
        self.fetch_list(
            "find_items_by_price_less_than",
            r#"
            SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
            FROM item
            WHERE price < $1
            ORDER BY id
            "#,
            ListBind::Int(price),
        )
        .await
    }

    async fn find_by_price_less_than_order_by_price_desc(&self, price: i32) -> Result<Vec<Item>, DomainError> {
        self.fetch_list(
            "find_items_by_price_less_than_desc",
            r#"
            SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
            FROM item
            WHERE price < $1
            ORDER BY price DESC, id ASC
            "#,
            ListBind::Int(price),
        )
        .await
    }

    async fn find_by_detail_contains(&self, fragment: &str) -> Result<Vec<Item>, DomainError> {
        self.fetch_list(
            "find_items_by_detail",
            r#"
            SELECT id, name, detail, price, stock, sell_status, created_at, updated_at
            FROM item
            WHERE strpos(detail, $1) > 0
            ORDER BY price DESC, id ASC
            "#,
            ListBind::Text(fragment),
        )
        .await
    }

    async fn save(&self, item: &Item) -> Result<Item, DomainError> {
        match item.id {
            None => self.insert(item).await,
            Some(id) => self.update(id, item).await,
        }
    }

    async fn find_filtered(
        &self,
        predicate: &Predicate,
        sort: &ItemSort,
        page: PageRequest,
    ) -> Result<Page<Item>, DomainError> {
        let pool = &self.pool;
        // count and slice read one snapshot so the total matches the content
        let (total, rows): (u64, Vec<ItemRow>) = self
            .policy
            .read("find_items_filtered", move || async move {
                let mut tx = pool.begin().await?;
                sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
                    .execute(&mut *tx)
                    .await?;

                let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM item");
                push_predicate(&mut count_qb, predicate);
                let total: i64 = count_qb.build_query_scalar().fetch_one(&mut *tx).await?;
                let total = u64::try_from(total).unwrap_or_default();

                if page.offset() >= total {
                    tx.commit().await?;
                    return Ok((total, Vec::new()));
                }

                let mut qb = QueryBuilder::<Postgres>::new(SELECT_ITEM);
                push_predicate(&mut qb, predicate);
                push_order_by(&mut qb, sort);
                push_page(&mut qb, page);
                let rows = qb.build_query_as::<ItemRow>().fetch_all(&mut *tx).await?;

                tx.commit().await?;
                Ok((total, rows))
            })
            .await?;

        debug!(total, returned = rows.len(), "Filtered items fetched");
        Ok(Page::new(rows.into_iter().map(Item::from).collect(), total, page))
    }

    async fn count(&self, predicate: &Predicate) -> Result<u64, DomainError> {
        let pool = &self.pool;
        let total: i64 = self
            .policy
            .read("count_items", move || async move {
                let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM item");
                push_predicate(&mut qb, predicate);
                qb.build_query_scalar::<i64>().fetch_one(pool).await
            })
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
