//! Text normalization and matching primitives.
//!
//! All fuzzy matching in the pipeline (franchise detection, publisher
//! policy lookup, name-based deduplication, relevance scoring) goes
//! through these functions so the edge cases live in one place.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching: lowercase, strip diacritics, collapse
/// punctuation and whitespace runs into single spaces.
///
/// `"Pokémon: Mystery-Dungeon"` becomes `"pokemon mystery dungeon"`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut last_was_space = true;
    for c in stripped.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    // Combining diacritical marks block, left behind by NFD decomposition.
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Split normalized text into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Token set for overlap comparisons.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Fraction of `query` tokens that appear in `target` (0.0 - 1.0).
pub fn token_overlap(query: &str, target: &str) -> f64 {
    let query_tokens = token_set(query);
    if query_tokens.is_empty() {
        return 0.0;
    }
    let target_tokens = token_set(target);
    let hits = query_tokens
        .iter()
        .filter(|t| target_tokens.contains(*t))
        .count();
    hits as f64 / query_tokens.len() as f64
}

/// Case/diacritic/spacing-insensitive substring match in either direction.
///
/// Used for publisher/developer policy lookup where the store may hold
/// "GameFreak" and the policy table "game freak" (or vice versa).
pub fn fuzzy_contains(a: &str, b: &str) -> bool {
    let na = normalize(a).replace(' ', "");
    let nb = normalize(b).replace(' ', "");
    if na.is_empty() || nb.is_empty() {
        return false;
    }
    na.contains(&nb) || nb.contains(&na)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Pokémon"), "pokemon");
        assert_eq!(normalize("Château Noir"), "chateau noir");
    }

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(
            normalize("Super Mario Bros.: The Lost Levels!"),
            "super mario bros the lost levels"
        );
        assert_eq!(normalize("a - b -- c"), "a b c");
    }

    #[test]
    fn test_normalize_empty_and_symbols() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Zelda II: The Adventure"), vec!["zelda", "ii", "the", "adventure"]);
    }

    #[test]
    fn test_token_overlap() {
        assert_eq!(token_overlap("mario kart", "Super Mario Kart"), 1.0);
        assert_eq!(token_overlap("mario kart", "Mario Party"), 0.5);
        assert_eq!(token_overlap("mario", "Final Fantasy"), 0.0);
        assert_eq!(token_overlap("", "anything"), 0.0);
    }

    #[test]
    fn test_fuzzy_contains_spacing_variants() {
        assert!(fuzzy_contains("GameFreak", "game freak"));
        assert!(fuzzy_contains("game freak", "GameFreak"));
        assert!(fuzzy_contains("Nintendo of America", "nintendo"));
        assert!(!fuzzy_contains("Capcom", "Konami"));
    }

    #[test]
    fn test_fuzzy_contains_empty_never_matches() {
        assert!(!fuzzy_contains("", "nintendo"));
        assert!(!fuzzy_contains("nintendo", ""));
    }
}
