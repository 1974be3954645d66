// ============================================================================
// Shop API - Member Handlers
// File: crates/shop-api/src/handlers/members.rs
// ============================================================================
//! Registration and login (form posts)

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Form, Json,
};
use shop_core::domain::{Member, MemberForm};

use crate::dto::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Register handler - POST /members/new
pub async fn register(
    State(state): State<AppState>,
    form: Result<Form<RegisterRequest>, FormRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Member>>), ApiError> {
    let Form(request) = form?;
    let member = state.members.register(MemberForm::from(request)).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(member))))
}

/// Login handler - POST /members/login
///
/// Answers with the member profile only; no session is issued.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Json<ApiResponse<Member>>, ApiError> {
    let Form(request) = form?;
    let member = state.members.authenticate(&request.email, &request.password).await?;
    Ok(Json(ApiResponse::success(member)))
}
