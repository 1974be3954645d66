//! Domain services (business logic)

pub mod search_service;
pub mod item_service;
pub mod member_service;

pub use search_service::SearchService;
pub use item_service::ItemService;
pub use member_service::MemberService;
