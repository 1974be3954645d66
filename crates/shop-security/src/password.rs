//! Password hashing with bcrypt.
//!
//! New hashes are always bcrypt. Verification also understands Argon2 PHC
//! strings so members imported from an Argon2 store can still log in.

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use shop_shared::constants::DEFAULT_BCRYPT_COST;
use thiserror::Error;
use tracing::warn;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;
/// Longer input would be silently truncated by bcrypt, so it is refused.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Unsupported hash format")]
    UnsupportedHash,
    #[error("Invalid bcrypt cost {0}")]
    InvalidCost(u32),
    #[error("Password longer than {0} bytes")]
    TooLong(usize),
}

fn bcrypt_error(e: bcrypt::BcryptError) -> PasswordError {
    match e {
        bcrypt::BcryptError::Truncation(_) => PasswordError::TooLong(MAX_PASSWORD_BYTES),
        other => PasswordError::HashError(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::non_truncating_hash(password, self.cost).map_err(bcrypt_error)
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        // $2a$, $2b$, $2y$
        if hash.starts_with("$2") {
            return bcrypt::non_truncating_verify(password, hash).map_err(bcrypt_error);
        }

        // $argon2id$, $argon2i$, $argon2d$
        if hash.starts_with("$argon2") {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|e| PasswordError::HashError(e.to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        warn!("Stored password hash has an unknown format");
        Err(PasswordError::UnsupportedHash)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self { cost: DEFAULT_BCRYPT_COST }
    }
}
