//! Renders item predicates, sort orders and paging into SQL.
//!
//! Only column names from [`ItemSortField::as_column`] and fixed keywords are
//! pushed as text; every user value goes through `push_bind`.

use shop_core::search::{Condition, ItemSort, Predicate};
use shop_shared::types::PageRequest;
use sqlx::{Postgres, QueryBuilder};

pub(crate) fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    for (i, condition) in predicate.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::NameEquals(name) => {
                qb.push("name = ").push_bind(name.clone());
            }
            Condition::DetailContains(fragment) => {
                // strpos keeps `%` and `_` literal, unlike LIKE
                qb.push("strpos(detail, ").push_bind(fragment.clone()).push(") > 0");
            }
            Condition::PriceGreaterThan(price) => {
                qb.push("price > ").push_bind(*price);
            }
            Condition::StatusEquals(status) => {
                qb.push("sell_status = ").push_bind(status.as_str());
            }
        }
    }
}

pub(crate) fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, sort: &ItemSort) {
    qb.push(" ORDER BY ");
    if sort.is_empty() {
        qb.push("id ASC");
        return;
    }
    let mut keys = qb.separated(", ");
    for order in sort.orders() {
        keys.push(format!("{} {}", order.field.as_column(), order.direction.as_sql()));
    }
}

pub(crate) fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: PageRequest) {
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    qb.push(" LIMIT ")
        .push_bind(i64::from(page.size()))
        .push(" OFFSET ")
        .push_bind(offset);
}
