// ============================================================================
// Shop Core - Member Service
// File: crates/shop-core/src/services/member_service.rs
// ============================================================================
//! Member registration and credential checks

use std::sync::{Arc, OnceLock};

use shop_security::{PasswordError, PasswordService};
use shop_shared::utils::mask_email;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::{Member, MemberForm};
use crate::error::{DomainError, FieldErrors};
use crate::repositories::MemberRepository;

pub struct MemberService<R: MemberRepository + ?Sized> {
    member_repo: Arc<R>,
    passwords: PasswordService,
    /// Hash checked against when the email is unknown, so a miss costs as
    /// much as a wrong password.
    decoy_hash: Arc<OnceLock<String>>,
}

impl<R: MemberRepository + ?Sized> MemberService<R> {
    pub fn new(member_repo: Arc<R>, passwords: PasswordService) -> Self {
        Self {
            member_repo,
            passwords,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Register a new member
    pub async fn register(&self, form: MemberForm) -> Result<Member, DomainError> {
        let form = form.normalized();
        let masked = mask_email(&form.email);
        info!("Registration attempt for email: {}", masked);

        // 1. Validate every field
        if let Err(e) = form.validate() {
            let fields = FieldErrors::from(e);
            warn!("Registration rejected for {}: {:?}", masked, fields.fields().collect::<Vec<_>>());
            return Err(DomainError::ValidationFailure(fields));
        }

        // 2. Check if email already exists
        if self.member_repo.find_by_email(&form.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", masked);
            return Err(DomainError::DuplicateEmail(form.email));
        }

        // 3. Hash password off the async workers
        let MemberForm { name, email, password, address } = form;
        let password_hash = self.hash(password).await?;

        // 4. Save; the unique index still guards concurrent registrations
        let member = Member::new(name, email, password_hash, address);
        let created = self.member_repo.create(&member).await?;

        info!(member_id = ?created.id, "Registration successful for: {}", masked);
        Ok(created)
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Member, DomainError> {
        let email = email.trim();
        let masked = mask_email(email);

        let member = self.member_repo.find_by_email(email).await?;

        let stored_hash = member.as_ref().map(|m| m.password.clone());
        let valid = self.verify(password.to_string(), stored_hash).await?;

        match member {
            Some(member) if valid => {
                info!(member_id = ?member.id, "Login successful for: {}", masked);
                Ok(member)
            }
            _ => {
                warn!("Login failed for: {}", masked);
                Err(DomainError::AuthFailure)
            }
        }
    }

    async fn hash(&self, password: String) -> Result<String, DomainError> {
        let passwords = self.passwords;
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| DomainError::PasswordHash(e.to_string()))?
            .map_err(|e| match e {
                PasswordError::TooLong(_) => DomainError::ValidationFailure(FieldErrors::single(
                    "password",
                    "Password must be at most 72 bytes.",
                )),
                other => DomainError::PasswordHash(other.to_string()),
            })
    }

    async fn verify(&self, password: String, stored_hash: Option<String>) -> Result<bool, DomainError> {
        let passwords = self.passwords;
        let decoy_hash = self.decoy_hash.clone();

        let outcome = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => passwords.verify(&password, &hash),
            None => {
                let decoy = decoy_hash.get_or_init(|| passwords.hash("decoy-password").unwrap_or_default());
                // Result ignored; only the time spent matters.
                let _ = passwords.verify(&password, decoy);
                Ok(false)
            }
        })
        .await
        .map_err(|e| DomainError::PasswordHash(e.to_string()))?;

        match outcome {
            Ok(valid) => Ok(valid),
            Err(e) => {
                // A corrupt stored hash is a failed login, not a server error.
                warn!("Password verification error: {}", e);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMemberRepository;
    use fake::faker::address::en::CityName;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn passwords() -> PasswordService {
        PasswordService::new(4).unwrap()
    }

    fn persisted(form: &MemberForm, hash: String) -> Member {
        let mut member = Member::new(form.name.clone(), form.email.clone(), hash, form.address.clone());
        member.id = Some(1);
        member
    }

    fn fake_form() -> MemberForm {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let address: String = CityName().fake();
        MemberForm::new(&name, &email, "s3cret", &address)
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let form = fake_form();
        let expected_email = form.email.clone();

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|member| member.password.starts_with("$2") && member.password != "s3cret")
            .times(1)
            .returning(|member| {
                let mut saved = member.clone();
                saved.id = Some(10);
                Ok(saved)
            });
        let service = MemberService::new(Arc::new(repo), passwords());

        let member = service.register(form).await.unwrap();
        assert_eq!(member.id, Some(10));
        assert_eq!(member.email, expected_email);
    }

    #[tokio::test]
    async fn test_register_reports_all_invalid_fields() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();
        let service = MemberService::new(Arc::new(repo), passwords());

        let form = MemberForm::new("", "not-an-email", "ab", "");
        match service.register(form).await {
            Err(DomainError::ValidationFailure(fields)) => {
                let names: Vec<&str> = fields.fields().collect();
                assert_eq!(names, vec!["address", "email", "name", "password"]);
                assert!(fields
                    .messages("password")
                    .iter()
                    .any(|m| m.contains("at least 4")));
            }
            other => panic!("expected validation failure, got {:?}", other.map(|m| m.id)),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let form = MemberForm::new("B", "a@b.com", "wxyz", "addr2");
        let existing = persisted(&MemberForm::new("A", "a@b.com", "abcd", "addr"), "$2b$04$x".into());

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();
        let service = MemberService::new(Arc::new(repo), passwords());

        let result = service.register(form).await;
        assert!(matches!(result, Err(DomainError::DuplicateEmail(email)) if email == "a@b.com"));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let form = MemberForm::new("A", "a@b.com", "abcd", "addr");
        let hash = passwords().hash("abcd").unwrap();
        let member = persisted(&form, hash);

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(member.clone())));
        let service = MemberService::new(Arc::new(repo), passwords());

        let found = service.authenticate("a@b.com", "abcd").await.unwrap();
        assert_eq!(found.id, Some(1));

        let wrong = service.authenticate("a@b.com", "abce").await;
        assert!(matches!(wrong, Err(DomainError::AuthFailure)));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_the_same() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        let service = MemberService::new(Arc::new(repo), passwords());

        let unknown = service.authenticate("nobody@b.com", "abcd").await.unwrap_err();
        assert!(matches!(unknown, DomainError::AuthFailure));
        assert_eq!(unknown.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_auth_failure() {
        let form = MemberForm::new("A", "a@b.com", "abcd", "addr");
        let member = persisted(&form, "plaintext".into());

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(member.clone())));
        let service = MemberService::new(Arc::new(repo), passwords());

        let result = service.authenticate("a@b.com", "plaintext").await;
        assert!(matches!(result, Err(DomainError::AuthFailure)));
    }
}
