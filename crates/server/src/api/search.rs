//! Search API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use ludex_core::{CacheStats, SearchOptions, SearchOutcome};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<usize>,
    #[serde(default)]
    pub fast_mode: bool,
    #[serde(default)]
    pub include_metrics: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub status: String,
}

/// POST /api/v1/search
///
/// Run a coordinated search across the configured sources.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchOutcome>, (StatusCode, Json<ErrorResponse>)> {
    let options = SearchOptions {
        max_results: body.max_results,
        fast_mode: body.fast_mode,
        include_metrics: body.include_metrics,
    };

    match state.coordinator().coordinated_search(&body.query, &options).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// POST /api/v1/search/cache/clear
///
/// Drop all cached search results. Used after override flags change.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<ClearCacheResponse> {
    state.coordinator().clear_cache();
    Json(ClearCacheResponse {
        status: "cleared".to_string(),
    })
}

/// GET /api/v1/search/cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.coordinator().cache_stats())
}
