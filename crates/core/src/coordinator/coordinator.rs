//! The search coordinator: query validation, franchise expansion,
//! caching, in-flight coalescing and response assembly.
//!
//! The result cache and the coalescing table are the only mutable
//! shared state in the pipeline. Both are owned by the coordinator
//! instance, bounded, and guarded by plain mutexes that are never held
//! across an await. Cancelling a search means dropping its future:
//! partial results are never cached, because the cache write is the
//! last step of the shared gathering future.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CoordinatorConfig;
use crate::franchise;
use crate::metrics;
use crate::scoring::{self, QueryShape};
use crate::sources::GameSource;
use crate::text::normalize;

use super::cache::ResultCache;
use super::gather::{gather, GatherOutput, GatherParams};
use super::types::{CacheStats, SearchError, SearchMetrics, SearchOptions, SearchOutcome};

type SharedGather = Shared<BoxFuture<'static, Result<GatherOutput, SearchError>>>;

pub struct SearchCoordinator {
    config: CoordinatorConfig,
    local: Arc<dyn GameSource>,
    external: Arc<dyn GameSource>,
    cache: Arc<Mutex<ResultCache>>,
    inflight: Arc<Mutex<InflightTable>>,
    generation: Arc<AtomicU64>,
}

impl SearchCoordinator {
    pub fn new(
        config: CoordinatorConfig,
        local: Arc<dyn GameSource>,
        external: Arc<dyn GameSource>,
    ) -> Self {
        let cache = ResultCache::new(
            Duration::from_secs(config.cache_ttl_secs),
            config.cache_max_entries,
        );
        let inflight = InflightTable::new(config.cache_max_entries);
        Self {
            config,
            local,
            external,
            cache: Arc::new(Mutex::new(cache)),
            inflight: Arc::new(Mutex::new(inflight)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The public search entrypoint.
    ///
    /// Never fails for "no results": an empty list with no error is a
    /// successful search. Only unrecoverable pipeline errors surface.
    pub async fn coordinated_search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();

        let normalized = normalize(query);
        if normalized.chars().count() < self.config.min_query_len {
            debug!(request_id = %request_id, query = %query, "Query below minimum length, rejecting without I/O");
            metrics::SEARCHES_TOTAL.with_label_values(&["rejected"]).inc();
            return Ok(self.assemble(
                GatherOutput::default(),
                options,
                QueryShape::SpecificTitle,
                false,
                false,
                started,
                request_id,
            ));
        }

        let series = franchise::detect(&normalized);
        let shape = scoring::classify(&normalized, series.is_some());
        let series_slug = series.as_ref().map(|m| m.series.slug).unwrap_or("-");
        let cache_key = format!("{normalized}|{series_slug}|{}", options.fast_mode);

        if let Some(cached) = lock(&self.cache).get(&cache_key) {
            debug!(request_id = %request_id, key = %cache_key, "Cache hit");
            metrics::SEARCHES_TOTAL.with_label_values(&["cache_hit"]).inc();
            return Ok(self.assemble(cached, options, shape, true, false, started, request_id));
        }

        let (shared, coalesced) = self.join_or_start(
            cache_key,
            GatherParams {
                config: self.config.clone(),
                query: normalized,
                expansions: series.map(|m| m.expansions).unwrap_or_default(),
                franchise_detected: series_slug != "-",
                shape,
                fast_mode: options.fast_mode,
            },
        );
        if coalesced {
            debug!(request_id = %request_id, "Joining identical in-flight search");
        }

        match shared.await {
            Ok(output) => {
                let outcome_label = if coalesced { "coalesced" } else { "completed" };
                metrics::SEARCHES_TOTAL.with_label_values(&[outcome_label]).inc();
                metrics::SEARCH_DURATION.observe(started.elapsed().as_secs_f64());
                info!(
                    request_id = %request_id,
                    results = output.candidates.len(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "Search complete"
                );
                Ok(self.assemble(output, options, shape, false, coalesced, started, request_id))
            }
            Err(e) => {
                metrics::SEARCHES_TOTAL.with_label_values(&["failed"]).inc();
                Err(e)
            }
        }
    }

    /// Drop all cached results and in-flight entries. Used after an
    /// override flag changes to force fresh searches. Bumping the
    /// generation first stops gathers that are already running from
    /// repopulating the cache with pre-clear output when they finish.
    pub fn clear_cache(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        lock(&self.cache).clear();
        lock(&self.inflight).clear();
        info!("Search cache and in-flight table cleared");
    }

    pub fn cache_stats(&self) -> CacheStats {
        lock(&self.cache).stats()
    }

    /// Join an identical in-flight gather, or start one. The gathering
    /// future owns its cleanup: it removes its coalescing entry and
    /// populates the cache as its final steps, so callers that drop
    /// early never commit partial results. A gather every caller has
    /// abandoned stays parked in the table until oldest-eviction drops
    /// the last handle to it.
    fn join_or_start(&self, key: String, params: GatherParams) -> (SharedGather, bool) {
        let mut inflight = lock(&self.inflight);
        if let Some(existing) = inflight.get(&key) {
            return (existing, true);
        }

        let local = Arc::clone(&self.local);
        let external = Arc::clone(&self.external);
        let cache = Arc::clone(&self.cache);
        let inflight_table = Arc::clone(&self.inflight);
        let generation = Arc::clone(&self.generation);
        let started_generation = generation.load(Ordering::Acquire);
        let entry_id = inflight.allocate_id();
        let own_key = key.clone();

        let fut: BoxFuture<'static, Result<GatherOutput, SearchError>> = Box::pin(async move {
            let result = gather(local, external, params).await;
            // Remove only our own entry: it may have been evicted and
            // replaced by a newer identical search in the meantime.
            lock(&inflight_table).remove_if_current(&own_key, entry_id);
            if let Ok(output) = &result {
                // A clear_cache() issued mid-gather invalidates this run.
                if generation.load(Ordering::Acquire) == started_generation {
                    lock(&cache).insert(own_key, output.clone());
                }
            }
            result
        });
        let shared = fut.shared();
        inflight.insert(key, entry_id, shared.clone());
        (shared, false)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        output: GatherOutput,
        options: &SearchOptions,
        shape: QueryShape,
        cache_hit: bool,
        coalesced: bool,
        started: Instant,
        request_id: String,
    ) -> SearchOutcome {
        let cap = self.result_cap(options, shape);
        let mut results = output.candidates;
        results.truncate(cap);

        let metrics = options.include_metrics.then(|| SearchMetrics {
            request_id,
            cache_hit,
            coalesced,
            duration_ms: started.elapsed().as_millis() as u64,
            local_candidates: output.stats.local_candidates,
            external_candidates: output.stats.external_candidates,
            expansions_run: output.stats.expansions_run,
            duplicates_removed: output.stats.duplicates_removed,
            filtered_removed: output.stats.filtered_removed,
            soft_failures: output.stats.soft_failures,
        });

        SearchOutcome { results, metrics }
    }

    fn result_cap(&self, options: &SearchOptions, shape: QueryShape) -> usize {
        if let Some(explicit) = options.max_results {
            return explicit;
        }
        if options.fast_mode {
            return self.config.fast_cap;
        }
        match shape {
            QueryShape::FranchiseBrowse => self.config.browse_cap,
            QueryShape::SpecificTitle => self.config.specific_cap,
        }
    }
}

/// Bounded table of shared in-flight gathers, keyed like the cache.
///
/// Holding a `Shared` clone here keeps an abandoned gather alive after
/// every caller has dropped its future. Completion removes the entry;
/// past the size bound the oldest entry is evicted, which drops the
/// last handle to any gather nobody is awaiting anymore.
struct InflightTable {
    max_entries: usize,
    next_id: u64,
    entries: HashMap<String, (u64, SharedGather)>,
    order: VecDeque<String>,
}

impl InflightTable {
    fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            next_id: 0,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &str) -> Option<SharedGather> {
        self.entries.get(key).map(|(_, shared)| shared.clone())
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert(&mut self, key: String, id: u64, shared: SharedGather) {
        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, (id, shared));
    }

    /// Remove the entry for `key` only if it still belongs to the
    /// gather identified by `id`.
    fn remove_if_current(&mut self, key: &str, id: u64) {
        if self
            .entries
            .get(key)
            .is_some_and(|(entry_id, _)| *entry_id == id)
        {
            self.entries.remove(key);
            self.order.retain(|k| k != key);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Lock helper that survives poisoning; no lock is held across awaits
/// so a poisoned mutex only means a panicking test elsewhere.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockSource};

    #[tokio::test]
    async fn test_completed_search_leaves_no_inflight_entry() {
        let local = Arc::new(MockSource::local());
        local
            .set_default_results(vec![fixtures::official(
                "1",
                "Hollow Knight",
                "Team Cherry",
                2017,
            )])
            .await;
        let coordinator = SearchCoordinator::new(
            CoordinatorConfig::default(),
            local,
            Arc::new(MockSource::external()),
        );

        coordinator
            .coordinated_search("hollow knight", &SearchOptions::default())
            .await
            .unwrap();

        assert_eq!(lock(&coordinator.inflight).len(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_searches_do_not_grow_inflight_table_unbounded() {
        let config = CoordinatorConfig {
            cache_max_entries: 3,
            ..Default::default()
        };
        let local = Arc::new(MockSource::local());
        local.set_delay(Duration::from_secs(30)).await;
        let coordinator = Arc::new(SearchCoordinator::new(
            config,
            local,
            Arc::new(MockSource::external()),
        ));

        // Each search is started, left parked on the slow adapter, then
        // dropped by aborting its task, so nothing ever completes it.
        for i in 0..6 {
            let searcher = Arc::clone(&coordinator);
            let handle = tokio::spawn(async move {
                let query = format!("abandoned search {i}");
                let _ = searcher
                    .coordinated_search(&query, &SearchOptions::default())
                    .await;
            });
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.abort();
        }

        assert!(lock(&coordinator.inflight).len() <= 3);
    }
}
