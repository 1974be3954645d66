//! # Shop Shared
//! 
//! Shared configuration, paging types, and telemetry for the shop backend.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
