use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, items, members};
use crate::state::AppState;

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Storefront
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/items", get(items::search_items))
        .route("/items/{id}", get(items::get_item))
        .route("/members/new", post(members::register))
        .route("/members/login", post(members::login));

    // Catalog management
    let admin_routes = Router::new()
        .route("/admin/items", post(items::create_item))
        .route("/admin/items/{id}", put(items::update_item));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TimeoutLayer::new(request_timeout))
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
