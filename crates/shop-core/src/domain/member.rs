// ============================================================================
// Shop Core - Member Entity
// File: crates/shop-core/src/domain/member.rs
// Description: Registered shop member and the registration form
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rules::{not_blank, password_fits_hash};

pub type MemberId = i64;

/// Member entity. `password` always holds a hash, never the raw value.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Option<MemberId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: String, email: String, password_hash: String, address: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password: password_hash,
            address,
            created_at: Utc::now(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<hash>")
            .field("address", &self.address)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Registration input
#[derive(Clone, Deserialize, Validate)]
pub struct MemberForm {
    #[validate(
        custom(function = "not_blank", message = "Name is required."),
        length(max = 100, message = "Name must be at most 100 characters.")
    )]
    pub name: String,

    #[validate(
        custom(function = "not_blank", message = "Email is required."),
        email(message = "Email format is invalid."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,

    #[validate(
        custom(function = "not_blank", message = "Password is required."),
        length(min = 4, message = "Password must be at least 4 characters."),
        custom(function = "password_fits_hash", message = "Password must be at most 72 bytes.")
    )]
    pub password: String,

    #[validate(
        custom(function = "not_blank", message = "Address is required."),
        length(max = 255, message = "Address must be at most 255 characters.")
    )]
    pub address: String,
}

impl MemberForm {
    pub fn new(name: &str, email: &str, password: &str, address: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            address: address.to_string(),
        }
    }

    /// Trim surrounding whitespace from everything but the password.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.address = self.address.trim().to_string();
        self
    }
}

impl fmt::Debug for MemberForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_member_form() {
        let form = MemberForm::new("A", "a@b.com", "abcd", "addr");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let form = MemberForm::new("", "not-an-email", "ab", "");
        let err = form.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("address"));
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(MemberForm::new("A", "a@b.com", "äöüß", "addr").validate().is_ok());
        assert!(MemberForm::new("A", "a@b.com", "abc", "addr").validate().is_err());
    }

    #[test]
    fn test_fields_are_capped_to_column_widths() {
        assert!(MemberForm::new(&"n".repeat(100), "a@b.com", "abcd", &"x".repeat(255)).validate().is_ok());

        let err = MemberForm::new(&"n".repeat(101), "a@b.com", "abcd", &"x".repeat(300))
            .validate()
            .unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("address"));
        assert!(!fields.contains_key("email"));

        let long_email = format!("{}@b.com", "a".repeat(250));
        let err = MemberForm::new("A", &long_email, "abcd", "addr").validate().unwrap_err();
        assert!(err.field_errors().contains_key("email"));
    }

    #[test]
    fn test_password_longer_than_hash_input_is_rejected() {
        assert!(MemberForm::new("A", "a@b.com", &"a".repeat(72), "addr").validate().is_ok());
        let err = MemberForm::new("A", "a@b.com", &format!("{}X", "a".repeat(80)), "addr")
            .validate()
            .unwrap_err();
        assert!(err.field_errors().contains_key("password"));
    }

    #[test]
    fn test_debug_never_shows_password() {
        let form = MemberForm::new("A", "a@b.com", "hunter22", "addr");
        assert!(!format!("{:?}", form).contains("hunter22"));

        let member = Member::new("A".into(), "a@b.com".into(), "$2b$04$hash".into(), "addr".into());
        assert!(!format!("{:?}", member).contains("$2b$04$hash"));
        assert!(!serde_json::to_string(&member).unwrap().contains("password"));
    }
}
