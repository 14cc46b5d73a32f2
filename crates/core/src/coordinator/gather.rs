//! Candidate gathering: sequential multi-query retrieval, dedup,
//! legitimacy filtering, scoring and sorting.
//!
//! Queries run one at a time against the local store on purpose: it is
//! an admission-control policy for the backing store, not an accident.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{CatalogRecord, RecordSource};
use crate::config::CoordinatorConfig;
use crate::legitimacy;
use crate::metrics;
use crate::scoring::{self, QueryShape};
use crate::sources::GameSource;

use super::types::{ScoredCandidate, SearchError};

/// Inputs captured by a single gathering run.
#[derive(Debug, Clone)]
pub(crate) struct GatherParams {
    pub config: CoordinatorConfig,
    /// Normalized original query; relevance is scored against this.
    pub query: String,
    /// Franchise expansion queries, already capped.
    pub expansions: Vec<String>,
    pub franchise_detected: bool,
    pub shape: QueryShape,
    pub fast_mode: bool,
}

/// Counters describing one gathering run.
#[derive(Debug, Clone, Default)]
pub(crate) struct GatherStats {
    pub local_candidates: usize,
    pub external_candidates: usize,
    pub expansions_run: usize,
    pub duplicates_removed: usize,
    pub filtered_removed: usize,
    pub soft_failures: usize,
}

/// Scored, sorted, untruncated candidates plus run counters. This is
/// what the cache and the coalescing table hold.
#[derive(Debug, Clone, Default)]
pub(crate) struct GatherOutput {
    pub candidates: Vec<ScoredCandidate>,
    pub stats: GatherStats,
}

pub(crate) async fn gather(
    local: Arc<dyn GameSource>,
    external: Arc<dyn GameSource>,
    params: GatherParams,
) -> Result<GatherOutput, SearchError> {
    let mut stats = GatherStats::default();
    let mut pool: Vec<(CatalogRecord, RecordSource)> = Vec::new();

    // Original query first, then expansions, strictly sequential. Fast
    // mode skips the expansion fan-out entirely.
    let mut queries = vec![params.query.clone()];
    if !params.fast_mode {
        queries.extend(params.expansions.iter().cloned());
    }

    for (index, query) in queries.iter().enumerate() {
        if pool.len() >= params.config.early_termination_count {
            debug!(
                accumulated = pool.len(),
                skipped = queries.len() - index,
                "Early termination reached, skipping remaining expansions"
            );
            break;
        }
        match local.search(query, params.config.per_query_limit).await {
            Ok(records) => {
                if index > 0 {
                    stats.expansions_run += 1;
                }
                stats.local_candidates += records.len();
                pool.extend(records.into_iter().map(|r| (r, local.source())));
            }
            Err(e) if e.is_transient() => {
                warn!(query = %query, error = %e, "Local store query failed, continuing");
                metrics::ADAPTER_FAILURES
                    .with_label_values(&["local_store"])
                    .inc();
                stats.soft_failures += 1;
            }
            Err(e) => return Err(SearchError::Fatal(e.to_string())),
        }
    }

    // Frugal fallback: one external query when local results are thin.
    // Franchise queries are expected to be rich, so they fall back at a
    // higher threshold.
    let thin_threshold = if params.franchise_detected {
        params.config.thin_results_franchise
    } else {
        params.config.thin_results
    };
    if pool.len() < thin_threshold {
        match external.search(&params.query, params.config.per_query_limit).await {
            Ok(records) => {
                stats.external_candidates += records.len();
                pool.extend(records.into_iter().map(|r| (r, external.source())));
            }
            Err(e) if e.is_transient() => {
                warn!(query = %params.query, error = %e, "External catalog fallback failed, continuing");
                metrics::ADAPTER_FAILURES
                    .with_label_values(&["external_catalog"])
                    .inc();
                stats.soft_failures += 1;
            }
            Err(e) => return Err(SearchError::Fatal(e.to_string())),
        }
    }

    let deduped = deduplicate(pool, &mut stats);

    let before_filter = deduped.len();
    let filtered: Vec<(CatalogRecord, RecordSource)> = deduped
        .into_iter()
        .filter(|(record, _)| legitimacy::removal_reason(record).is_none())
        .collect();
    stats.filtered_removed = before_filter - filtered.len();

    let candidates = score_and_sort(&params.query, params.shape, filtered);
    metrics::CANDIDATES_FOUND.observe(candidates.len() as f64);

    Ok(GatherOutput { candidates, stats })
}

/// Deduplicate by external catalog id, local id, then normalized name.
/// When duplicates collide, the higher base-quality record survives.
fn deduplicate(
    pool: Vec<(CatalogRecord, RecordSource)>,
    stats: &mut GatherStats,
) -> Vec<(CatalogRecord, RecordSource)> {
    let mut kept: Vec<(CatalogRecord, RecordSource, f64)> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for (record, source) in pool {
        let quality = scoring::base_quality(&record);
        let keys = dedup_keys(&record);
        match keys.iter().find_map(|k| index_by_key.get(k)).copied() {
            Some(i) => {
                stats.duplicates_removed += 1;
                if quality > kept[i].2 {
                    kept[i] = (record, source, quality);
                }
                for key in keys {
                    index_by_key.insert(key, i);
                }
            }
            None => {
                let i = kept.len();
                for key in keys {
                    index_by_key.insert(key, i);
                }
                kept.push((record, source, quality));
            }
        }
    }

    kept.into_iter().map(|(r, s, _)| (r, s)).collect()
}

fn dedup_keys(record: &CatalogRecord) -> Vec<String> {
    let mut keys = Vec::with_capacity(3);
    if let Some(ext) = record.external_id {
        keys.push(format!("ext:{ext}"));
    }
    keys.push(format!("loc:{}", record.id));
    keys.push(format!("name:{}", crate::text::normalize(&record.name)));
    keys
}

/// Score survivors and sort by composite rank, descending, with stable
/// popularity-then-name tie-breaks so ordering is deterministic for a
/// fixed record snapshot.
fn score_and_sort(
    query: &str,
    shape: QueryShape,
    records: Vec<(CatalogRecord, RecordSource)>,
) -> Vec<ScoredCandidate> {
    let bare: Vec<CatalogRecord> = records.iter().map(|(r, _)| r.clone()).collect();
    let qualities = scoring::quality_scores(&bare);

    let mut candidates: Vec<ScoredCandidate> = records
        .into_iter()
        .zip(qualities)
        .map(|((record, source), quality)| {
            let relevance = scoring::relevance(query, &record);
            let rank_score = scoring::composite_score(relevance, quality, shape, record.greenlight);
            ScoredCandidate {
                record,
                relevance,
                quality,
                rank_score,
                source,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.rank_score
            .total_cmp(&a.rank_score)
            .then_with(|| {
                b.record
                    .popularity_score()
                    .total_cmp(&a.record.popularity_score())
            })
            .then_with(|| a.record.name.cmp(&b.record.name))
            .then_with(|| a.record.id.cmp(&b.record.id))
    });

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    fn pooled(record: CatalogRecord) -> (CatalogRecord, RecordSource) {
        (record, RecordSource::LocalStore)
    }

    #[test]
    fn test_dedup_by_external_id() {
        let mut a = fixtures::record("1", "Pokemon Red");
        a.external_id = Some(1020);
        let mut b = fixtures::record("2", "Pokemon Red (JP)");
        b.external_id = Some(1020);

        let mut stats = GatherStats::default();
        let kept = deduplicate(vec![pooled(a), pooled(b)], &mut stats);
        assert_eq!(kept.len(), 1);
        assert_eq!(stats.duplicates_removed, 1);
    }

    #[test]
    fn test_dedup_by_normalized_name() {
        let a = fixtures::record("1", "Pokémon Red");
        let b = fixtures::record("2", "pokemon red!");

        let mut stats = GatherStats::default();
        let kept = deduplicate(vec![pooled(a), pooled(b)], &mut stats);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_dedup_keeps_higher_quality_duplicate() {
        let mut weak = fixtures::record("1", "Pokemon Red");
        weak.rating_count = 1;
        let mut strong = fixtures::record("2", "Pokemon Red");
        strong.total_rating = Some(90.0);
        strong.rating_count = 2000;
        strong.follows = 9000;

        let mut stats = GatherStats::default();
        let kept = deduplicate(vec![pooled(weak), pooled(strong)], &mut stats);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].0.id, "2");
    }

    #[test]
    fn test_dedup_distinct_records_survive() {
        let a = fixtures::record("1", "Pokemon Red");
        let b = fixtures::record("2", "Pokemon Blue");

        let mut stats = GatherStats::default();
        let kept = deduplicate(vec![pooled(a), pooled(b)], &mut stats);
        assert_eq!(kept.len(), 2);
        assert_eq!(stats.duplicates_removed, 0);
    }

    #[test]
    fn test_score_and_sort_is_deterministic() {
        let records = vec![
            pooled(fixtures::record("1", "Pokemon Blue")),
            pooled(fixtures::record("2", "Pokemon Red")),
            pooled(fixtures::record("3", "Pokemon Yellow")),
        ];
        let a = score_and_sort("pokemon", QueryShape::FranchiseBrowse, records.clone());
        let b = score_and_sort("pokemon", QueryShape::FranchiseBrowse, records);
        let names_a: Vec<_> = a.iter().map(|c| c.record.name.clone()).collect();
        let names_b: Vec<_> = b.iter().map(|c| c.record.name.clone()).collect();
        assert_eq!(names_a, names_b);
        // Equal scores fall back to name order.
        assert_eq!(names_a, vec!["Pokemon Blue", "Pokemon Red", "Pokemon Yellow"]);
    }

    #[test]
    fn test_score_and_sort_ranks_greenlight_first() {
        let mut boosted = fixtures::record("1", "Unrelated Mod");
        boosted.greenlight = true;
        let strong = {
            let mut r = fixtures::record("2", "Pokemon Red");
            r.total_rating = Some(95.0);
            r.rating_count = 5000;
            r.follows = 10000;
            r
        };
        let sorted = score_and_sort(
            "pokemon",
            QueryShape::FranchiseBrowse,
            vec![pooled(boosted), pooled(strong)],
        );
        assert_eq!(sorted[0].record.id, "1");
        assert!(sorted[0].rank_score > sorted[1].rank_score);
    }
}
