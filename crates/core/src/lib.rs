pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod franchise;
pub mod legitimacy;
pub mod metrics;
pub mod scoring;
pub mod sources;
pub mod testing;
pub mod text;

pub use catalog::{CatalogRecord, GameCategory, RecordSource};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CoordinatorConfig,
    ExternalCatalogConfig, LocalStoreConfig, ServerConfig,
};
pub use coordinator::{
    CacheStats, ScoredCandidate, SearchCoordinator, SearchError, SearchMetrics, SearchOptions,
    SearchOutcome,
};
pub use sources::{
    AdapterError, DisabledSource, ExternalCatalogAdapter, GameSource, LocalStoreAdapter,
};
