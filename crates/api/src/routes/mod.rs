//! API routes

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod root;

/// Build the service router. Paths outside these two fall through to
/// axum's default 404.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(root::index))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
}
