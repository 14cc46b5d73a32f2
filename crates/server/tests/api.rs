//! HTTP API integration tests.
//!
//! The router is exercised in-process with tower's `oneshot`, backed by
//! mock sources so no network is involved.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ludex_core::{
    testing::{fixtures, MockSource},
    Config, CoordinatorConfig, LocalStoreConfig, SearchCoordinator, ServerConfig,
};

mod support {
    use super::*;

    pub fn test_config() -> Config {
        Config {
            server: ServerConfig::default(),
            local_store: LocalStoreConfig {
                url: "http://localhost:9999".to_string(),
                api_key: "test-key".to_string(),
                timeout_secs: 1,
            },
            external_catalog: None,
            coordinator: CoordinatorConfig::default(),
        }
    }

    pub async fn app_with_catalog(records: Vec<ludex_core::CatalogRecord>) -> Router {
        let local = Arc::new(MockSource::local());
        local.set_default_results(records).await;
        let external = Arc::new(MockSource::external());
        let coordinator = Arc::new(SearchCoordinator::new(
            CoordinatorConfig::default(),
            local,
            external,
        ));
        let state = Arc::new(ludex_server::AppState::new(test_config(), coordinator));
        ludex_server::create_router(state)
    }

    pub async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

use support::{app_with_catalog, body_json};

fn sample_catalog() -> Vec<ludex_core::CatalogRecord> {
    vec![
        fixtures::official("1", "Pokemon Red", "Nintendo", 1996),
        fixtures::official("2", "Pokemon Blue", "Nintendo", 1996),
        fixtures::fan_made("3", "Pokemon Uranium", "Uranium Team"),
    ]
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with_catalog(vec![]).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_search_endpoint_filters_and_ranks() {
    let app = app_with_catalog(sample_catalog()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/search")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"query": "pokemon"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Pokemon Red"));
    assert!(!names.contains(&"Pokemon Uranium"));
    assert!(body["metrics"].is_null());
}

#[tokio::test]
async fn test_search_endpoint_with_metrics() {
    let app = app_with_catalog(sample_catalog()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/search")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"query": "pokemon", "include_metrics": true}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["metrics"]["cache_hit"], false);
    assert!(body["metrics"]["request_id"].is_string());
}

#[tokio::test]
async fn test_search_endpoint_short_query_returns_empty() {
    let app = app_with_catalog(sample_catalog()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/search")
        .header("content-type", "application/json")
        .body(Body::from(json!({"query": "a"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cache_clear_and_stats_endpoints() {
    let app = app_with_catalog(sample_catalog()).await;

    let search_request = |uri: &str| {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json!({"query": "pokemon"}).to_string()))
            .unwrap()
    };

    let _ = app.clone().oneshot(search_request("/api/v1/search")).await.unwrap();
    let _ = app.clone().oneshot(search_request("/api/v1/search")).await.unwrap();

    let stats_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let stats = body_json(stats_response).await;
    assert_eq!(stats["entries"], 1);
    assert!(stats["hits"].as_u64().unwrap() >= 1);

    let clear_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/search/cache/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(clear_response.status(), StatusCode::OK);

    let stats_response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let stats = body_json(stats_response).await;
    assert_eq!(stats["entries"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_prometheus_text() {
    let app = app_with_catalog(vec![]).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("ludex_http_requests"));
}
