//! Repository traits (ports)

pub mod item_repository;
pub mod member_repository;

pub use item_repository::ItemRepository;
pub use member_repository::MemberRepository;

#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
