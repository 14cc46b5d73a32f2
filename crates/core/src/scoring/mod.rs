//! Relevance, quality/originality and composite rank scoring.

mod quality;
mod relevance;
mod shape;

pub use quality::{base_quality, quality_scores};
pub use relevance::relevance;
pub use shape::{classify, composite_score, QueryShape, GREENLIGHT_BOOST};
