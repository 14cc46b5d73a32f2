//! Franchise/series detection and query expansion.

mod descriptors;
mod detector;

pub use descriptors::{SeriesDescriptor, SERIES};
pub use detector::{detect, MatchKind, SeriesMatch, MAX_EXPANSIONS};
