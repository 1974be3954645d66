// ============================================================================
// Shop Infrastructure - PostgreSQL Member Repository
// File: crates/shop-infrastructure/src/database/postgres/member_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use shop_core::domain::Member;
use shop_core::error::DomainError;
use shop_core::repositories::MemberRepository;

use crate::database::policy::{storage_failure, StorePolicy};

pub struct PgMemberRepository {
    pool: PgPool,
    policy: StorePolicy,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool, policy: StorePolicy) -> Self {
        Self { pool, policy }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MemberRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: Some(row.id),
            name: row.name,
            email: row.email,
            password: row.password,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let pool = &self.pool;
        let row: Option<MemberRow> = self
            .policy
            .read("find_member_by_email", move || {
                sqlx::query_as::<_, MemberRow>(
                    r#"
                    SELECT id, name, email, password, address, created_at
                    FROM member
                    WHERE LOWER(email) = LOWER($1)
                    "#,
                )
                .bind(email)
                .fetch_optional(pool)
            })
            .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, member: &Member) -> Result<Member, DomainError> {
        let row: MemberRow = self
            .policy
            .write(
                "insert_member",
                sqlx::query_as::<_, MemberRow>(
                    r#"
                    INSERT INTO member (name, email, password, address, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, name, email, password, address, created_at
                    "#,
                )
                .bind(&member.name)
                .bind(&member.email)
                .bind(&member.password)
                .bind(&member.address)
                .bind(member.created_at)
                .fetch_one(&self.pool),
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    warn!("Unique violation creating member");
                    DomainError::DuplicateEmail(member.email.clone())
                } else {
                    storage_failure("insert_member", e)
                }
            })?;

        info!("Member created: {}", row.id);
        Ok(row.into())
    }
}
