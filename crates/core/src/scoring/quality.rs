//! Quality and originality scoring.
//!
//! Quality combines normalized rating, rating volume and popularity.
//! Originality distinguishes an original release from remasters/ports
//! derived from it: records referencing a parent are derivative, and
//! within a same-name cluster only the earliest unparented release
//! counts as the original.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::catalog::CatalogRecord;
use crate::text::normalize;

/// Multiplier applied to records that reference a parent release.
const DERIVATIVE_MULTIPLIER: f64 = 0.6;
/// Multiplier for unparented records that are not the earliest release
/// among same-named entries (re-releases without lineage metadata).
const LATE_SIBLING_MULTIPLIER: f64 = 0.85;

/// Rating volume saturates around this many ratings.
const RATING_COUNT_SATURATION: f64 = 1000.0;
/// Popularity (follows + hype) saturates around this value.
const POPULARITY_SATURATION: f64 = 10_000.0;

/// Compute quality scores for a batch, parallel to the input slice.
///
/// Batch-level because the originality signal needs the name-matched
/// cluster, not just the record itself.
pub fn quality_scores(records: &[CatalogRecord]) -> Vec<f64> {
    let earliest = earliest_by_name(records);
    records
        .iter()
        .map(|record| {
            let base = base_quality(record);
            base * originality_multiplier(record, &earliest)
        })
        .collect()
}

/// Quality of a single record ignoring originality, in [0, 1].
pub fn base_quality(record: &CatalogRecord) -> f64 {
    // Unrated records sit at a neutral midpoint rather than the bottom,
    // so new releases are not buried below shovelware with one rating.
    let rating = match record.total_rating {
        Some(r) => (r / 100.0).clamp(0.0, 1.0),
        None => 0.5,
    };
    let volume = saturating_log(record.rating_count as f64, RATING_COUNT_SATURATION);
    let popularity = saturating_log(record.popularity_score(), POPULARITY_SATURATION);

    (rating * 0.5 + volume * 0.2 + popularity * 0.3).clamp(0.0, 1.0)
}

fn saturating_log(value: f64, saturation: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    ((1.0 + value).ln() / (1.0 + saturation).ln()).min(1.0)
}

fn earliest_by_name(records: &[CatalogRecord]) -> HashMap<String, DateTime<Utc>> {
    let mut earliest: HashMap<String, DateTime<Utc>> = HashMap::new();
    for record in records {
        let Some(date) = record.release_date else {
            continue;
        };
        earliest
            .entry(normalize(&record.name))
            .and_modify(|d| *d = (*d).min(date))
            .or_insert(date);
    }
    earliest
}

fn originality_multiplier(
    record: &CatalogRecord,
    earliest: &HashMap<String, DateTime<Utc>>,
) -> f64 {
    if record.is_derivative() {
        return DERIVATIVE_MULTIPLIER;
    }
    match (record.release_date, earliest.get(&normalize(&record.name))) {
        (Some(date), Some(first)) if date > *first => LATE_SIBLING_MULTIPLIER,
        _ => 1.0,
    }
}
