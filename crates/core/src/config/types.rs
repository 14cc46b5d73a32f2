use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub local_store: LocalStoreConfig,
    #[serde(default)]
    pub external_catalog: Option<ExternalCatalogConfig>,
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Local store search RPC configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocalStoreConfig {
    /// Store base URL (e.g., "https://abc.example.co").
    pub url: String,
    /// Store API key.
    pub api_key: String,
    /// Request timeout in seconds (default: 5).
    #[serde(default = "default_adapter_timeout")]
    pub timeout_secs: u32,
}

/// External catalog RPC configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExternalCatalogConfig {
    /// Catalog API base URL (e.g., "https://api.igdb.com/v4").
    pub url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth bearer token.
    pub token: String,
    /// Request timeout in seconds (default: 5).
    #[serde(default = "default_adapter_timeout")]
    pub timeout_secs: u32,
}

fn default_adapter_timeout() -> u32 {
    5
}

/// Search coordinator tuning knobs. Defaults match the documented
/// policy; overriding them is for tests and unusual deployments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoordinatorConfig {
    /// Queries shorter than this (after normalization) are rejected
    /// without I/O.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Result cache TTL (default: 30 minutes).
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Result cache size bound; oldest entry evicted past this.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    /// Stop issuing expansion queries once this many candidates are
    /// accumulated.
    #[serde(default = "default_early_termination")]
    pub early_termination_count: usize,
    /// Fall back to the external catalog below this candidate count.
    #[serde(default = "default_thin_results")]
    pub thin_results: usize,
    /// Stricter fallback threshold when a franchise was detected.
    #[serde(default = "default_thin_results_franchise")]
    pub thin_results_franchise: usize,
    /// Per-query limit passed to adapters.
    #[serde(default = "default_per_query_limit")]
    pub per_query_limit: u32,
    /// Result cap for franchise-browse queries.
    #[serde(default = "default_browse_cap")]
    pub browse_cap: usize,
    /// Result cap for specific-title queries.
    #[serde(default = "default_specific_cap")]
    pub specific_cap: usize,
    /// Result cap in fast/interactive mode.
    #[serde(default = "default_fast_cap")]
    pub fast_cap: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            early_termination_count: default_early_termination(),
            thin_results: default_thin_results(),
            thin_results_franchise: default_thin_results_franchise(),
            per_query_limit: default_per_query_limit(),
            browse_cap: default_browse_cap(),
            specific_cap: default_specific_cap(),
            fast_cap: default_fast_cap(),
        }
    }
}

fn default_min_query_len() -> usize {
    2
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_cache_max_entries() -> usize {
    100
}

fn default_early_termination() -> usize {
    20
}

fn default_thin_results() -> usize {
    5
}

fn default_thin_results_franchise() -> usize {
    10
}

fn default_per_query_limit() -> u32 {
    50
}

fn default_browse_cap() -> usize {
    40
}

fn default_specific_cap() -> usize {
    20
}

fn default_fast_cap() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_defaults() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.cache_ttl_secs, 1800);
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.early_termination_count, 20);
        assert_eq!(config.browse_cap, 40);
        assert_eq!(config.specific_cap, 20);
        assert_eq!(config.fast_cap, 8);
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_franchise_threshold_stricter_than_base() {
        let config = CoordinatorConfig::default();
        assert!(config.thin_results_franchise > config.thin_results);
    }
}
