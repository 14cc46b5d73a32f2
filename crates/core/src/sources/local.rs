//! Local store search adapter.
//!
//! Talks to the store's search RPC, which filters on name substring and
//! returns full catalog records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::catalog::{CatalogRecord, RecordSource};
use crate::config::LocalStoreConfig;

use super::{map_transport_error, AdapterError, GameSource};

pub struct LocalStoreAdapter {
    client: Client,
    config: LocalStoreConfig,
}

impl LocalStoreAdapter {
    pub fn new(config: LocalStoreConfig) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| AdapterError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn search_url(&self, query: &str, limit: u32) -> String {
        format!(
            "{}/rpc/search_games?q={}&limit={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(query),
            limit
        )
    }
}

#[async_trait]
impl GameSource for LocalStoreAdapter {
    fn name(&self) -> &str {
        "local_store"
    }

    fn source(&self) -> RecordSource {
        RecordSource::LocalStore
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogRecord>, AdapterError> {
        let url = self.search_url(query, limit);
        debug!(query = %query, limit = limit, "Searching local store");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
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

        let records: Vec<CatalogRecord> = response
            .json()
            .await
            .map_err(|e| AdapterError::Malformed(e.to_string()))?;

        debug!(query = %query, results = records.len(), "Local store search complete");
        Ok(records)
    }
}
