//! PostgreSQL repository implementations

pub mod filter;
pub mod item_repo_impl;
pub mod member_repo_impl;

pub use item_repo_impl::PgItemRepository;
pub use member_repo_impl::PgMemberRepository;
