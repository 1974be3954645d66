//! # Shop Core
//! 
//! Domain entities, item search predicates, repository traits, and services
//! for the shop backend.

pub mod domain;
pub mod search;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, FieldErrors};
