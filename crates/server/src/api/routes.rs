use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware, search};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Search
        .route("/search", post(search::search))
        .route("/search/cache/clear", post(search::clear_cache))
        .route("/search/cache/stats", get(search::cache_stats))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
