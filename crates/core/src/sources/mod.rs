//! Data source adapters: the local store and the external catalog.
//!
//! Adapters own transport, timeouts and retries and expose a uniform
//! `search(query, limit)` contract to the coordinator.

mod external;
mod local;

pub use external::ExternalCatalogAdapter;
pub use local::LocalStoreAdapter;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{CatalogRecord, RecordSource};

/// Errors surfaced by a source adapter.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("upstream error: HTTP {status}")]
    Upstream { status: u16 },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl AdapterError {
    /// Transient errors are recovered by skipping the query or falling
    /// back to another source; only malformed responses are fatal.
    pub fn is_transient(&self) -> bool {
        !matches!(self, AdapterError::Malformed(_))
    }

    /// Whether the external catalog adapter should retry the query
    /// against the local store.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            AdapterError::NotFound(_)
                | AdapterError::Upstream { .. }
                | AdapterError::Network(_)
                | AdapterError::Timeout
        )
    }
}

/// Uniform search contract over a record source.
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Which backend this adapter represents, tagged onto results.
    fn source(&self) -> RecordSource;

    /// Search for records matching the query.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CatalogRecord>, AdapterError>;
}

/// Stand-in source for deployments without an external catalog
/// configured. Always returns no results.
pub struct DisabledSource;

#[async_trait]
impl GameSource for DisabledSource {
    fn name(&self) -> &str {
        "disabled"
    }

    fn source(&self) -> RecordSource {
        RecordSource::ExternalCatalog
    }

    async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<CatalogRecord>, AdapterError> {
        Ok(Vec::new())
    }
}

/// Map a reqwest failure onto the adapter error taxonomy.
pub(crate) fn map_transport_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::Timeout
    } else if e.is_connect() {
        AdapterError::Network(e.to_string())
    } else if let Some(status) = e.status() {
        AdapterError::Upstream {
            status: status.as_u16(),
        }
    } else {
        AdapterError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(AdapterError::Timeout.is_transient());
        assert!(AdapterError::Network("reset".into()).is_transient());
        assert!(AdapterError::Upstream { status: 502 }.is_transient());
        assert!(AdapterError::NotFound("x".into()).is_transient());
        assert!(!AdapterError::Malformed("bad json".into()).is_transient());
    }

    #[test]
    fn test_fallback_classification() {
        assert!(AdapterError::NotFound("x".into()).triggers_fallback());
        assert!(AdapterError::Upstream { status: 500 }.triggers_fallback());
        assert!(AdapterError::Network("down".into()).triggers_fallback());
        assert!(!AdapterError::Malformed("bad".into()).triggers_fallback());
    }
}
