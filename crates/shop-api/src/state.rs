use std::sync::Arc;

use shop_core::repositories::{ItemRepository, MemberRepository};
use shop_core::services::{ItemService, MemberService, SearchService};
use shop_security::PasswordService;
use shop_shared::config::SearchSettings;

pub type DynSearchService = SearchService<dyn ItemRepository>;
pub type DynItemService = ItemService<dyn ItemRepository>;
pub type DynMemberService = MemberService<dyn MemberRepository>;

/// Services shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<DynSearchService>,
    pub items: Arc<DynItemService>,
    pub members: Arc<DynMemberService>,
    /// Page size used when a search omits `size`.
    pub default_page_size: u32,
}

impl AppState {
    pub fn new(
        item_repo: Arc<dyn ItemRepository>,
        member_repo: Arc<dyn MemberRepository>,
        passwords: PasswordService,
        search: &SearchSettings,
    ) -> Self {
        Self {
            search: Arc::new(SearchService::with_max_page_size(item_repo.clone(), search.max_page_size)),
            items: Arc::new(ItemService::new(item_repo)),
            members: Arc::new(MemberService::new(member_repo, passwords)),
            default_page_size: search.default_page_size,
        }
    }
}
