//! In-memory repository implementations.
//!
//! Same contracts as the PostgreSQL adapters, backed by ordered maps behind a
//! lock. Used when `database.backend = "memory"` and throughout the tests.

pub mod item_store;
pub mod member_store;

pub use item_store::InMemoryItemRepository;
pub use member_store::InMemoryMemberRepository;
