//! Member repository trait (port)

use async_trait::async_trait;

use crate::domain::Member;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    /// Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, member: &Member) -> Result<Member, DomainError>;
}
