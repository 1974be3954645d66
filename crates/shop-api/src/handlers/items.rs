// ============================================================================
// Shop API - Item Handlers
// File: crates/shop-api/src/handlers/items.rs
// ============================================================================
//! Catalog search and management

use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use shop_core::domain::{Item, ItemForm, ItemId};
use shop_shared::types::Page;

use crate::dto::ItemSearchQuery;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Search handler - GET /items
pub async fn search_items(
    State(state): State<AppState>,
    query: Result<Query<ItemSearchQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Page<Item>>>, ApiError> {
    let Query(query) = query?;

    let criteria = query.criteria()?;
    let sort = query.sort()?;
    let page = query.page_number()?.unwrap_or(0);
    let size = query.page_size()?.unwrap_or(i64::from(state.default_page_size));

    let result = state.search.search(&criteria, sort.as_ref(), page, size).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Item detail - GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let Path(id) = id?;
    let item = state.items.get(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Create item - POST /admin/items
pub async fn create_item(
    State(state): State<AppState>,
    form: Result<Json<ItemForm>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Item>>), ApiError> {
    let Json(form) = form?;
    let item = state.items.create(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Update item - PUT /admin/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<ItemId>, PathRejection>,
    form: Result<Json<ItemForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Item>>, ApiError> {
    let Path(id) = id?;
    let Json(form) = form?;
    let item = state.items.update(id, form).await?;
    Ok(Json(ApiResponse::success(item)))
}
