//! Franchise detection: map a raw query to a known series descriptor
//! plus an ordered list of expansion queries.
//!
//! Pure function, no I/O. Empty, single-character and unrecognized
//! queries return `None` without error.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::text::normalize;

use super::descriptors::{SeriesDescriptor, SERIES};

/// Cap on expansion queries to bound downstream fan-out.
pub const MAX_EXPANSIONS: usize = 8;

/// Trailing sequel marker: arabic or roman numerals, or an "X" suffix
/// ("mega man 3", "final fantasy vii", "mega man x").
static SEQUEL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+(\d{1,3}|[ivx]{1,5})$").unwrap());

/// How a query matched a descriptor, ordered by specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// Character name mapped to its parent franchise.
    Character,
    /// Franchise name appears in the query.
    FranchiseName,
    /// Sub-series or spin-off line name appears in the query.
    SubSeries,
}

/// A detected series with its expansion queries.
#[derive(Debug)]
pub struct SeriesMatch {
    pub series: &'static SeriesDescriptor,
    pub kind: MatchKind,
    /// Expansion queries, capped at [`MAX_EXPANSIONS`], excluding the
    /// normalized original query itself.
    pub expansions: Vec<String>,
}

/// Detect a franchise in a free-text query.
///
/// Matching order within a descriptor: exact/contained franchise name,
/// then character mapping, then sub-series pattern. Across descriptors
/// the most specific match wins (sub-series before base franchise),
/// with ties broken by declaration order.
pub fn detect(query: &str) -> Option<SeriesMatch> {
    let normalized = normalize(query);
    if normalized.len() < 2 {
        return None;
    }

    let mut best: Option<(usize, MatchKind)> = None;
    for (index, descriptor) in SERIES.iter().enumerate() {
        if let Some(kind) = match_descriptor(&normalized, descriptor) {
            let better = match best {
                Some((_, best_kind)) => kind > best_kind,
                None => true,
            };
            if better {
                best = Some((index, kind));
            }
        }
    }

    best.map(|(index, kind)| {
        let series = &SERIES[index];
        SeriesMatch {
            series,
            kind,
            expansions: build_expansions(series, &normalized),
        }
    })
}

fn match_descriptor(normalized: &str, descriptor: &SeriesDescriptor) -> Option<MatchKind> {
    // Sub-series checked first so a "mario kart" query reports the most
    // specific kind even though "mario" also matches the base name.
    if descriptor.sub_series.iter().any(|s| contains_phrase(normalized, s)) {
        return Some(MatchKind::SubSeries);
    }
    if descriptor.names.iter().any(|n| contains_phrase(normalized, n)) {
        return Some(MatchKind::FranchiseName);
    }
    // Sequel-suffix queries ("zelda 2") reduce to the base name.
    if let Some(caps) = SEQUEL_SUFFIX.captures(normalized) {
        let base = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if descriptor.names.iter().any(|n| contains_phrase(base, n)) {
            return Some(MatchKind::FranchiseName);
        }
    }
    if descriptor.characters.iter().any(|c| contains_phrase(normalized, c)) {
        return Some(MatchKind::Character);
    }
    None
}

/// Whole-word phrase containment on normalized text.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    haystack.split(' ').count() >= phrase.split(' ').count()
        && haystack
            .match_indices(phrase)
            .any(|(start, _)| {
                let end = start + phrase.len();
                let left_ok = start == 0 || haystack.as_bytes()[start - 1] == b' ';
                let right_ok = end == haystack.len() || haystack.as_bytes()[end] == b' ';
                left_ok && right_ok
            })
}

fn build_expansions(series: &SeriesDescriptor, normalized_query: &str) -> Vec<String> {
    series
        .expansions
        .iter()
        .filter(|e| **e != normalized_query)
        .take(MAX_EXPANSIONS)
        .map(|e| e.to_string())
        .collect()
}
