//! HTTP router construction.
//!
//! Assembles all Axum routes and middleware into a single `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/tools", get(api::list_tools))
        .route("/tools/{name}", post(api::call_tool))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
