//! External catalog (IGDB-style) search adapter.
//!
//! On not-found, server-error and network-error classes the adapter
//! transparently retries against the local store, so from the
//! coordinator's perspective it never fails a search, only returns
//! fewer results.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{CatalogRecord, GameCategory, RecordSource};
use crate::config::ExternalCatalogConfig;

use super::{map_transport_error, AdapterError, GameSource};

/// The catalog RPC caps page size at 100.
const MAX_UPSTREAM_LIMIT: u32 = 100;

pub struct ExternalCatalogAdapter {
    client: Client,
    config: ExternalCatalogConfig,
    /// Local store used when the upstream call fails.
    fallback: Arc<dyn GameSource>,
}

impl ExternalCatalogAdapter {
    pub fn new(
        config: ExternalCatalogConfig,
        fallback: Arc<dyn GameSource>,
    ) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| AdapterError::Network(e.to_string()))?;
        Ok(Self {
            client,
            config,
            fallback,
        })
    }

    fn query_body(query: &str, limit: u32) -> String {
        // APIcalypse query: escape embedded quotes in the search term.
        let escaped = query.replace('"', "\\\"");
        format!(
            "search \"{}\"; fields name,alternative_names.name,summary,category,total_rating,\
             total_rating_count,follows,hypes,first_release_date,parent_game,\
             involved_companies.company.name,involved_companies.developer,\
             involved_companies.publisher; limit {};",
            escaped, limit
        )
    }

    async fn search_upstream(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogRecord>, AdapterError> {
        let url = format!("{}/games", self.config.url.trim_end_matches('/'));
        debug!(query = %query, limit = limit, "Searching external catalog");

        let response = self
            .client
            .post(&url)
            .header("Client-ID", &self.config.client_id)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .body(Self::query_body(query, limit))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(AdapterError::NotFound(query.to_string()));
        }
        if !status.is_success() {
            return Err(AdapterError::Upstream {
                status: status.as_u16(),
            });
        }

        let rows: Vec<ExternalGame> = response
            .json()
            .await
            .map_err(|e| AdapterError::Malformed(e.to_string()))?;

        debug!(query = %query, results = rows.len(), "External catalog search complete");
        Ok(rows.into_iter().map(ExternalGame::into_record).collect())
    }
}

#[async_trait]
impl GameSource for ExternalCatalogAdapter {
    fn name(&self) -> &str {
        "external_catalog"
    }

    fn source(&self) -> RecordSource {
        RecordSource::ExternalCatalog
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogRecord>, AdapterError> {
        let limit = limit.min(MAX_UPSTREAM_LIMIT);
        match self.search_upstream(query, limit).await {
            Ok(records) => Ok(records),
            Err(e) if e.triggers_fallback() => {
                warn!(query = %query, error = %e, "External catalog failed, falling back to local store");
                self.fallback.search(query, limit).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Raw row from the external catalog RPC.
#[derive(Debug, Deserialize)]
struct ExternalGame {
    id: u64,
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<u8>,
    #[serde(default)]
    total_rating: Option<f64>,
    #[serde(default)]
    total_rating_count: Option<u32>,
    #[serde(default)]
    follows: Option<u32>,
    #[serde(default)]
    hypes: Option<u32>,
    /// Unix timestamp (seconds).
    #[serde(default)]
    first_release_date: Option<i64>,
    #[serde(default)]
    parent_game: Option<u64>,
    #[serde(default)]
    alternative_names: Vec<AlternativeName>,
    #[serde(default)]
    involved_companies: Vec<InvolvedCompany>,
}

#[derive(Debug, Deserialize)]
struct AlternativeName {
    name: String,
}

#[derive(Debug, Deserialize)]
struct InvolvedCompany {
    #[serde(default)]
    company: Option<Company>,
    #[serde(default)]
    developer: bool,
    #[serde(default)]
    publisher: bool,
}

#[derive(Debug, Deserialize)]
struct Company {
    name: String,
}

impl ExternalGame {
    fn into_record(self) -> CatalogRecord {
        let mut developer = None;
        let mut publisher = None;
        for involved in &self.involved_companies {
            let Some(company) = &involved.company else {
                continue;
            };
            if involved.developer && developer.is_none() {
                developer = Some(company.name.clone());
            }
            if involved.publisher && publisher.is_none() {
                publisher = Some(company.name.clone());
            }
        }

        CatalogRecord {
            // External-only records have no local id yet; keyed by the
            // external id for deduplication downstream.
            id: format!("ext-{}", self.id),
            external_id: Some(self.id),
            name: self.name,
            alternative_names: self
                .alternative_names
                .into_iter()
                .map(|a| a.name)
                .collect(),
            summary: self.summary,
            developer,
            publisher,
            category: map_category(self.category),
            total_rating: self.total_rating,
            rating_count: self.total_rating_count.unwrap_or(0),
            follows: self.follows.unwrap_or(0),
            hypes: self.hypes.unwrap_or(0),
            release_date: self.first_release_date.and_then(unix_to_datetime),
            parent_id: self.parent_game,
            greenlight: false,
            redlight: false,
            flag_reason: None,
            flagged_by: None,
            flagged_at: None,
        }
    }
}

fn unix_to_datetime(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

/// Map the catalog's numeric category codes onto [`GameCategory`].
fn map_category(code: Option<u8>) -> GameCategory {
    match code {
        Some(0) => GameCategory::MainGame,
        Some(3) | Some(13) => GameCategory::Bundle,
        Some(5) | Some(12) => GameCategory::ModOrHack,
        Some(6) | Some(7) => GameCategory::Season,
        Some(8) | Some(9) | Some(10) => GameCategory::Remaster,
        Some(11) => GameCategory::Port,
        None => GameCategory::MainGame,
        Some(_) => GameCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockSource};

    #[tokio::test]
    async fn test_unreachable_upstream_falls_back_to_local_store() {
        let fallback = Arc::new(MockSource::local());
        fallback
            .set_default_results(vec![fixtures::official(
                "1",
                "Pokemon Red",
                "Nintendo",
                1996,
            )])
            .await;
        let config = ExternalCatalogConfig {
            // Nothing listens on port 1, so the upstream call fails with
            // a network error and must trigger the fallback path.
            url: "http://127.0.0.1:1".to_string(),
            client_id: "test-client".to_string(),
            token: "test-token".to_string(),
            timeout_secs: 1,
        };
        let adapter = ExternalCatalogAdapter::new(config, fallback.clone()).unwrap();

        let records = adapter.search("pokemon", 10).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Pokemon Red");
        assert_eq!(fallback.recorded_queries().await, vec!["pokemon"]);
    }

    #[test]
    fn test_query_body_escapes_quotes() {
        let body = ExternalCatalogAdapter::query_body("say \"hello\"", 10);
        assert!(body.contains("search \"say \\\"hello\\\"\";"));
        assert!(body.contains("limit 10;"));
    }

    #[test]
    fn test_map_category_codes() {
        assert_eq!(map_category(Some(0)), GameCategory::MainGame);
        assert_eq!(map_category(Some(5)), GameCategory::ModOrHack);
        assert_eq!(map_category(Some(9)), GameCategory::Remaster);
        assert_eq!(map_category(Some(11)), GameCategory::Port);
        assert_eq!(map_category(Some(7)), GameCategory::Season);
        assert_eq!(map_category(Some(99)), GameCategory::Other);
        assert_eq!(map_category(None), GameCategory::MainGame);
    }

    #[test]
    fn test_external_game_into_record() {
        let json = r#"{
            "id": 1020,
            "name": "Pokemon Red",
            "summary": "Catch them all",
            "category": 0,
            "total_rating": 88.5,
            "total_rating_count": 1200,
            "follows": 5000,
            "first_release_date": 824428800,
            "alternative_names": [{"name": "Pocket Monsters Red"}],
            "involved_companies": [
                {"company": {"name": "Game Freak"}, "developer": true, "publisher": false},
                {"company": {"name": "Nintendo"}, "developer": false, "publisher": true}
            ]
        }"#;
        let game: ExternalGame = serde_json::from_str(json).unwrap();
        let record = game.into_record();

        assert_eq!(record.external_id, Some(1020));
        assert_eq!(record.id, "ext-1020");
        assert_eq!(record.developer.as_deref(), Some("Game Freak"));
        assert_eq!(record.publisher.as_deref(), Some("Nintendo"));
        assert_eq!(record.release_date.unwrap().timestamp(), 824428800);
        assert_eq!(record.alternative_names, vec!["Pocket Monsters Red"]);
        assert!(!record.greenlight);
    }

    #[test]
    fn test_external_game_minimal_row() {
        let json = r#"{"id": 7, "name": "Obscure Game"}"#;
        let game: ExternalGame = serde_json::from_str(json).unwrap();
        let record = game.into_record();
        assert_eq!(record.category, GameCategory::MainGame);
        assert!(record.release_date.is_none());
        assert!(record.publisher.is_none());
    }
}
