//! Domain errors to HTTP responses

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shop_core::{DomainError, FieldErrors};
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request could not be decoded into the expected shape.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None)
            }
            ApiError::Domain(DomainError::ValidationFailure(fields)) => {
                tracing::warn!("Validation failed: {}", fields);
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                    Some(fields),
                )
            }
            ApiError::Domain(e @ DomainError::DuplicateEmail(_)) => {
                let message = e.to_string();
                tracing::warn!("Conflict: {}", message);
                let fields = FieldErrors::single("email", &message);
                (StatusCode::CONFLICT, "DUPLICATE_EMAIL", message, Some(fields))
            }
            ApiError::Domain(DomainError::InvalidArgument(msg)) => {
                tracing::warn!("Invalid argument: {}", msg);
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg, None)
            }
            ApiError::Domain(e @ DomainError::AuthFailure) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", e.to_string(), None)
            }
            ApiError::Domain(DomainError::NotFound(what)) => {
                tracing::warn!("Not found: {}", what);
                (StatusCode::NOT_FOUND, "NOT_FOUND", format!("{} not found", what), None)
            }
            ApiError::Domain(DomainError::StorageFailure(msg)) => {
                tracing::error!("Storage failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::Domain(DomainError::PasswordHash(msg)) => {
                tracing::error!("Password hashing failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(code, &message, fields));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: DomainError) -> StatusCode {
        ApiError::from(e).into_response().status()
    }

    #[test]
    fn test_domain_error_status_mapping() {
        assert_eq!(status_of(DomainError::ValidationFailure(FieldErrors::single("name", "x"))), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::DuplicateEmail("a@b.com".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(DomainError::InvalidArgument("size".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::StorageFailure("boom".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(DomainError::AuthFailure), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::NotFound("item 3".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::PasswordHash("cost".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
