// ============================================================================
// Shop Core - Search Service
// File: crates/shop-core/src/services/search_service.rs
// ============================================================================
//! Filtered, sorted, paginated item search

use std::sync::Arc;

use shop_shared::constants::MAX_PAGE_SIZE;
use shop_shared::types::{Page, PageRequest};
use tracing::debug;

use crate::domain::Item;
use crate::error::DomainError;
use crate::repositories::ItemRepository;
use crate::search::{ItemSearchCriteria, ItemSort, Predicate, PredicateBuilder};

pub struct SearchService<R: ItemRepository + ?Sized> {
    item_repo: Arc<R>,
    max_page_size: u32,
}

impl<R: ItemRepository + ?Sized> SearchService<R> {
    pub fn new(item_repo: Arc<R>) -> Self {
        Self::with_max_page_size(item_repo, MAX_PAGE_SIZE)
    }

    pub fn with_max_page_size(item_repo: Arc<R>, max_page_size: u32) -> Self {
        Self { item_repo, max_page_size }
    }

    /// Search the catalog.
    ///
    /// `page_number` is zero-based. A page past the end comes back empty but
    /// still carries the full match count. Without an explicit `sort`, detail
    /// searches list the most expensive items first and everything else comes
    /// back in insertion order.
    pub async fn search(
        &self,
        criteria: &ItemSearchCriteria,
        sort: Option<&ItemSort>,
        page_number: i64,
        page_size: i64,
    ) -> Result<Page<Item>, DomainError> {
        // 1. Reject bad paging before touching the store
        let page = PageRequest::with_max_size(page_number, page_size, self.max_page_size)?;

        // 2. Build predicate
        let predicate = PredicateBuilder::build(criteria);

        // 3. Resolve ordering
        let sort = Self::resolve_sort(&predicate, sort);

        debug!(
            conditions = predicate.conditions().len(),
            page = page.page(),
            size = page.size(),
            "Searching items"
        );

        // 4. Fetch
        let result = self.item_repo.find_filtered(&predicate, &sort, page).await?;

        debug!(
            returned = result.content.len(),
            total = result.total_elements,
            "Item search finished"
        );

        Ok(result)
    }

    /// Unpaged detail-substring search, most expensive first.
    pub async fn search_by_detail(&self, fragment: &str) -> Result<Vec<Item>, DomainError> {
        self.item_repo.find_by_detail_contains(fragment).await
    }

    fn resolve_sort(predicate: &Predicate, requested: Option<&ItemSort>) -> ItemSort {
        let sort = match requested {
            Some(sort) if !sort.is_empty() => sort.clone(),
            _ if predicate.has_detail_filter() => ItemSort::price_desc(),
            _ => ItemSort::insertion_order(),
        };
        sort.with_tiebreaker()
    }
}
