//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod policy;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use policy::StorePolicy;
pub use postgres::{PgItemRepository, PgMemberRepository};
