//! Query shape classification and composite rank computation.

use crate::text::tokenize;

/// Additive boost for greenlit records, guaranteeing near-top placement
/// independent of relevance and quality.
pub const GREENLIGHT_BOOST: f64 = 150.0;

/// Coarse shape of a query, driving scoring weights and result caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// Looking for one game ("hollow knight", "final fantasy 7").
    SpecificTitle,
    /// Browsing a franchise ("pokemon", "zelda").
    FranchiseBrowse,
}

/// Classify a query. Deterministic over token count, sequel numerals
/// and whether the franchise detector matched.
pub fn classify(query: &str, franchise_detected: bool) -> QueryShape {
    let tokens = tokenize(query);
    if tokens.iter().any(|t| is_sequel_numeral(t)) {
        return QueryShape::SpecificTitle;
    }
    if franchise_detected && tokens.len() <= 2 {
        return QueryShape::FranchiseBrowse;
    }
    QueryShape::SpecificTitle
}

fn is_sequel_numeral(token: &str) -> bool {
    if token.chars().all(|c| c.is_ascii_digit()) && !token.is_empty() {
        return true;
    }
    // Roman numerals of length 2+ ("ii", "vii"); a bare "i" or "x" is
    // too ambiguous with ordinary words and sub-series suffixes.
    token.len() >= 2 && token.chars().all(|c| matches!(c, 'i' | 'v' | 'x' | 'l' | 'c'))
}

/// Combine relevance and quality into the final rank score.
///
/// Specific-title queries weight text relevance; franchise browsing
/// weights quality and popularity. Scaled to roughly [0, 100] before
/// the flag boost so greenlit records always outrank unflagged ones.
pub fn composite_score(relevance: f64, quality: f64, shape: QueryShape, greenlight: bool) -> f64 {
    let (relevance_weight, quality_weight) = match shape {
        QueryShape::SpecificTitle => (0.7, 0.3),
        QueryShape::FranchiseBrowse => (0.4, 0.6),
    };
    let mut score = (relevance * relevance_weight + quality * quality_weight) * 100.0;
    if greenlight {
        score += GREENLIGHT_BOOST;
    }
    score
}
