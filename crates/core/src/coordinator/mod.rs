//! Search coordination: caching, coalescing, gathering and ranking.

mod cache;
#[allow(clippy::module_inception)]
mod coordinator;
mod gather;
mod types;

pub use coordinator::SearchCoordinator;
pub use types::{
    CacheStats, ScoredCandidate, SearchError, SearchMetrics, SearchOptions, SearchOutcome,
};
