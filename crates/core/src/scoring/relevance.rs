//! Text relevance scoring between a query and a candidate record.

use crate::catalog::CatalogRecord;
use crate::text::{normalize, token_overlap};

/// Score how well a record matches the query text, in [0, 1].
///
/// Exact name match scores 1.0; substring containment and token overlap
/// degrade from there; unrelated text lands near 0. The summary is a
/// weak secondary target so a query can still find a game it describes.
pub fn relevance(query: &str, record: &CatalogRecord) -> f64 {
    let query_norm = normalize(query);
    if query_norm.is_empty() {
        return 0.0;
    }

    let mut score: f64 = name_score(&query_norm, &record.name);
    // Alternative titles count the same as the primary name, minus the
    // exact-match bonus.
    for alt in &record.alternative_names {
        score = score.max(name_score(&query_norm, alt).min(0.9));
    }
    if score >= 1.0 {
        return 1.0;
    }

    if let Some(summary) = &record.summary {
        score = score.max(token_overlap(&query_norm, summary) * 0.4);
    }

    score.clamp(0.0, 1.0)
}

fn name_score(query_norm: &str, name: &str) -> f64 {
    let name_norm = normalize(name);
    if name_norm.is_empty() {
        return 0.0;
    }
    if *query_norm == name_norm {
        return 1.0;
    }

    let mut score: f64 = 0.0;
    if name_norm.contains(query_norm) {
        // Query is a prefix/fragment of the title ("pokemon" in
        // "pokemon red").
        score = 0.8;
    } else if query_norm.contains(&name_norm) {
        // Title is shorter than the query ("mario" for "super mario 64").
        score = 0.7;
    }

    score.max(token_overlap(query_norm, name) * 0.75)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_exact_match_scores_one() {
        let record = fixtures::record("1", "Pokemon Red");
        assert_eq!(relevance("pokemon red", &record), 1.0);
        assert_eq!(relevance("Pokémon Red!", &record), 1.0);
    }

    #[test]
    fn test_substring_match_scores_high() {
        let record = fixtures::record("1", "Pokemon Red");
        let score = relevance("pokemon", &record);
        assert!(score >= 0.8, "got {score}");
        assert!(score < 1.0);
    }

    #[test]
    fn test_token_overlap_partial() {
        let record = fixtures::record("1", "Super Mario Kart");
        let score = relevance("mario racing", &record);
        assert!(score > 0.2, "got {score}");
        assert!(score < 0.8, "got {score}");
    }

    #[test]
    fn test_unrelated_text_scores_near_zero() {
        let record = fixtures::record("1", "Pokemon Red");
        assert!(relevance("doom eternal", &record) < 0.1);
    }

    #[test]
    fn test_summary_provides_weak_signal() {
        let mut record = fixtures::record("1", "Untitled Adventure");
        record.summary = Some("A monster catching adventure with gym badges".to_string());
        let with_summary = relevance("monster catching", &record);
        record.summary = None;
        let without = relevance("monster catching", &record);
        assert!(with_summary > without);
        assert!(with_summary <= 0.4);
    }

    #[test]
    fn test_alternative_name_matches() {
        let mut record = fixtures::record("1", "Biohazard");
        record.alternative_names = vec!["Resident Evil".to_string()];
        let score = relevance("resident evil", &record);
        assert!(score >= 0.8, "got {score}");
        assert!(score < 1.0);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let record = fixtures::record("1", "Pokemon Red");
        assert_eq!(relevance("", &record), 0.0);
    }
}
