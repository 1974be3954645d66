//! # Shop Core - Domain Module
//! 
//! Domain entities for the shop backend.

pub mod rules;
pub mod item;
pub mod member;

// Re-export all entities and enums
pub use item::{Item, ItemForm, ItemId, SellStatus};
pub use member::{Member, MemberForm, MemberId};
