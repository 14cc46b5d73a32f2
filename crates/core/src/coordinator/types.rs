//! Types for the search coordinator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogRecord, RecordSource};

/// Caller-facing options for a coordinated search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Result cap. Defaults by query shape (40 browse, 20 specific,
    /// 8 in fast mode) when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    /// Interactive mode: smaller result cap, no expansion fan-out.
    #[serde(default)]
    pub fast_mode: bool,
    /// Attach timing/cache/source diagnostics. No effect on results.
    #[serde(default)]
    pub include_metrics: bool,
}

/// A catalog record with its scores and source tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub record: CatalogRecord,
    /// Text-match strength in [0, 1].
    pub relevance: f64,
    /// Quality/originality score in [0, 1].
    pub quality: f64,
    /// Composite rank used for ordering.
    pub rank_score: f64,
    /// Which backend produced this record.
    pub source: RecordSource,
}

/// Diagnostics attached to a search when `include_metrics` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetrics {
    /// Correlates the response with log lines.
    pub request_id: String,
    pub cache_hit: bool,
    /// Whether this call piggybacked on an identical in-flight search.
    pub coalesced: bool,
    pub duration_ms: u64,
    pub local_candidates: usize,
    pub external_candidates: usize,
    /// Expansion queries actually issued (excludes the original).
    pub expansions_run: usize,
    pub duplicates_removed: usize,
    pub filtered_removed: usize,
    /// Adapter queries that failed transiently and were skipped.
    pub soft_failures: usize,
}

/// Result of a coordinated search. An empty result list is a success,
/// distinct from search infrastructure failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<ScoredCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SearchMetrics>,
}

/// Fatal pipeline errors. Transient adapter failures never surface
/// here; they are logged and the affected query is skipped.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("search pipeline failure: {0}")]
    Fatal(String),
}

/// Cache observability counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_defaults() {
        let options: SearchOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.max_results, None);
        assert!(!options.fast_mode);
        assert!(!options.include_metrics);
    }

    #[test]
    fn test_outcome_serialization_skips_missing_metrics() {
        let outcome = SearchOutcome {
            results: vec![],
            metrics: None,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("metrics"));
    }

    #[test]
    fn test_scored_candidate_flattens_record() {
        let candidate = ScoredCandidate {
            record: crate::testing::fixtures::record("1", "Pokemon Red"),
            relevance: 0.9,
            quality: 0.7,
            rank_score: 84.0,
            source: RecordSource::LocalStore,
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["name"], "Pokemon Red");
        assert_eq!(json["relevance"], 0.9);
        assert_eq!(json["source"], "local_store");
    }
}
