//! Mock record source for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{CatalogRecord, RecordSource};
use crate::sources::{AdapterError, GameSource};

/// Mock implementation of the `GameSource` trait.
///
/// Provides controllable behavior for testing:
/// - scripted results per query (with a default fallback set)
/// - recorded queries for assertions
/// - injectable errors and artificial latency
///
/// # Example
///
/// ```rust,ignore
/// use ludex_core::testing::{fixtures, MockSource};
///
/// let source = MockSource::local();
/// source.set_results_for("pokemon", vec![
///     fixtures::official("1", "Pokemon Red", "Nintendo", 1996),
/// ]).await;
///
/// let records = source.search("pokemon", 50).await?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(source.search_count().await, 1);
/// ```
pub struct MockSource {
    source: RecordSource,
    /// Results keyed by exact query; unmatched queries get `default_results`.
    results_by_query: Arc<RwLock<HashMap<String, Vec<CatalogRecord>>>>,
    default_results: Arc<RwLock<Vec<CatalogRecord>>>,
    /// Every search records its query string here.
    queries: Arc<RwLock<Vec<String>>>,
    /// Error returned by every search while set.
    error: Arc<RwLock<Option<AdapterError>>>,
    /// Artificial latency, for coalescing/cancellation tests.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockSource {
    pub fn new(source: RecordSource) -> Self {
        Self {
            source,
            results_by_query: Arc::new(RwLock::new(HashMap::new())),
            default_results: Arc::new(RwLock::new(Vec::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// A mock posing as the local store.
    pub fn local() -> Self {
        Self::new(RecordSource::LocalStore)
    }

    /// A mock posing as the external catalog.
    pub fn external() -> Self {
        Self::new(RecordSource::ExternalCatalog)
    }

    /// Set the results returned for one exact query string.
    pub async fn set_results_for(&self, query: &str, records: Vec<CatalogRecord>) {
        self.results_by_query
            .write()
            .await
            .insert(query.to_string(), records);
    }

    /// Set the results returned for queries without a scripted entry.
    pub async fn set_default_results(&self, records: Vec<CatalogRecord>) {
        *self.default_results.write().await = records;
    }

    /// Fail every search with this error until cleared.
    pub async fn set_error(&self, error: AdapterError) {
        *self.error.write().await = Some(error);
    }

    pub async fn clear_error(&self) {
        *self.error.write().await = None;
    }

    /// Delay each search, so concurrent callers overlap.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Queries issued so far, in order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    pub async fn search_count(&self) -> usize {
        self.queries.read().await.len()
    }

    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }
}

#[async_trait]
impl GameSource for MockSource {
    fn name(&self) -> &str {
        match self.source {
            RecordSource::LocalStore => "mock_local",
            RecordSource::ExternalCatalog => "mock_external",
        }
    }

    fn source(&self) -> RecordSource {
        self.source
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogRecord>, AdapterError> {
        self.queries.write().await.push(query.to_string());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.error.read().await.clone() {
            return Err(error);
        }

        let scripted = self.results_by_query.read().await.get(query).cloned();
        let mut records = match scripted {
            Some(records) => records,
            None => self.default_results.read().await.clone(),
        };
        records.truncate(limit as usize);
        Ok(records)
    }
}
