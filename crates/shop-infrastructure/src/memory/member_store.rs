use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::warn;

use shop_core::domain::{Member, MemberId};
use shop_core::error::DomainError;
use shop_core::repositories::MemberRepository;

#[derive(Default)]
struct MemberTable {
    last_id: MemberId,
    rows: BTreeMap<MemberId, Member>,
}

/// Emails compare case-insensitively, matching the unique index on
/// `LOWER(email)` in the relational schema.
#[derive(Default)]
pub struct InMemoryMemberRepository {
    table: RwLock<MemberTable>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|m| same_email(&m.email, email))
            .cloned())
    }

    async fn create(&self, member: &Member) -> Result<Member, DomainError> {
        // check and insert under one write lock
        let mut table = self.table.write();

        if table.rows.values().any(|m| same_email(&m.email, &member.email)) {
            warn!("Rejected duplicate member email");
            return Err(DomainError::DuplicateEmail(member.email.clone()));
        }

        table.last_id += 1;
        let id = table.last_id;
        let mut saved = member.clone();
        saved.id = Some(id);
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(email: &str) -> Member {
        Member::new("A".into(), email.into(), "$2b$04$hash".into(), "Seoul".into())
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = InMemoryMemberRepository::new();
        let first = repo.create(&member("a@b.com")).await.unwrap();
        let second = repo.create(&member("c@d.com")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(second.is_persisted());
        assert_eq!(repo.find_by_email("c@d.com").await.unwrap().unwrap().id, Some(2));
    }

    #[tokio::test]
    async fn test_find_by_email_ignores_case() {
        let repo = InMemoryMemberRepository::new();
        repo.create(&member("Kim@Example.com")).await.unwrap();
        let found = repo.find_by_email("kim@example.com").await.unwrap();
        assert_eq!(found.unwrap().email, "Kim@Example.com");
        assert!(repo.find_by_email("lee@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryMemberRepository::new();
        repo.create(&member("a@b.com")).await.unwrap();
        let err = repo.create(&member("A@B.COM")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
        assert_eq!(repo.len(), 1);
    }
}
