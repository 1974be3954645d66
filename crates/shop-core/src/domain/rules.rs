//! Field rules shared by the form validators

use shop_security::password::MAX_PASSWORD_BYTES;
use validator::ValidationError;

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if shop_shared::utils::is_blank(value) {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

pub fn password_fits_hash(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}
