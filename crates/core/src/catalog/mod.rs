//! Catalog record model shared across the search pipeline.

mod types;

pub use types::{CatalogRecord, GameCategory, RecordSource};
