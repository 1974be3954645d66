//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const CONFIG_ENV_PREFIX: &str = "SHOP";
