//! # Shop Infrastructure
//! 
//! Storage adapters for the shop repository ports: PostgreSQL for
//! production and in-memory tables for local runs and tests.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgItemRepository, PgMemberRepository, StorePolicy};
pub use memory::{InMemoryItemRepository, InMemoryMemberRepository};
