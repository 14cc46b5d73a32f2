//! Bounded, TTL'd result cache owned by the coordinator.
//!
//! Entries are never mutated in place: a refresh after expiry inserts a
//! new entry. Past the size bound the oldest entry is evicted.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use super::gather::GatherOutput;
use super::types::CacheStats;

struct CacheEntry {
    output: GatherOutput,
    created_at: Instant,
}

pub(crate) struct ResultCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<String, CacheEntry>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a live entry. Expired entries count as misses and are
    /// dropped lazily.
    pub fn get(&mut self, key: &str) -> Option<GatherOutput> {
        match self.entries.get(key) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => {
                self.hits += 1;
                Some(entry.output.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.order.retain(|k| k != key);
                self.misses += 1;
                None
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, output: GatherOutput) {
        if self.entries.remove(&key).is_some() {
            self.order.retain(|k| k != &key);
        }
        while self.entries.len() >= self.max_entries {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.evictions += 1;
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                output,
                created_at: Instant::now(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
