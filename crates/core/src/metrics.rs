//! Prometheus metrics for the search pipeline.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts};

/// Coordinated searches by outcome:
/// "rejected", "cache_hit", "coalesced", "completed", "failed".
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ludex_searches_total", "Total coordinated searches"),
        &["outcome"],
    )
    .unwrap()
});

/// End-to-end search duration in seconds (cache misses only).
pub static SEARCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "ludex_search_duration_seconds",
            "Duration of coordinated searches",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .unwrap()
});

/// Transient adapter failures by source.
pub static ADAPTER_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ludex_adapter_failures_total",
            "Transient adapter failures skipped by the coordinator",
        ),
        &["source"],
    )
    .unwrap()
});

/// Candidates surviving dedup and filtering, per search.
pub static CANDIDATES_FOUND: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "ludex_candidates_found",
            "Candidates per search after dedup and filtering",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 40.0, 80.0]),
    )
    .unwrap()
});

/// Register all pipeline metrics with a registry.
pub fn register(registry: &prometheus::Registry) {
    // Double registration only happens in tests sharing a registry.
    let _ = registry.register(Box::new(SEARCHES_TOTAL.clone()));
    let _ = registry.register(Box::new(SEARCH_DURATION.clone()));
    let _ = registry.register(Box::new(ADAPTER_FAILURES.clone()));
    let _ = registry.register(Box::new(CANDIDATES_FOUND.clone()));
}
