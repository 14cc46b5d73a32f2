//! Pure name-pattern predicates for fan-made and micro-content detection.
//!
//! Consolidated here so the legitimacy filter's edge cases are covered
//! by unit tests instead of living in inline conditionals.

use crate::text::{fuzzy_contains, tokenize};

/// Tokens that mark a title as fan-made regardless of its category.
const FAN_TOKENS: &[&str] = &["fan", "fangame", "fanmade", "homebrew", "hack", "romhack"];

/// Developers known to ship fan-made titles under a main-game category.
const FAN_DEVELOPERS: &[&str] = &[
    "uranium team",
    "involuntary twitch",
    "pokecommunity",
    "romhacking net",
];

/// True when the title carries a fan-content marker ("ROM hack",
/// "Fan Game", "Homebrew", ...). Token-based so "Final Fantasy" does
/// not trip the "fan" marker.
pub fn has_fan_content_marker(name: &str) -> bool {
    tokenize(name)
        .iter()
        .any(|token| FAN_TOKENS.contains(&token.as_str()))
}

/// True when the publisher or developer is a known fan outfit.
pub fn is_known_fan_developer(name: &str) -> bool {
    FAN_DEVELOPERS.iter().any(|dev| fuzzy_contains(name, dev))
}

/// True when the raw title carries the e-Reader "-e" suffix
/// ("Super Mario Advance 4-e"). Checked on the raw name because
/// normalization would merge the suffix into a bare "e" token.
pub fn has_ereader_suffix(raw_name: &str) -> bool {
    let trimmed = raw_name.trim_end();
    trimmed.len() > 2 && (trimmed.ends_with("-e") || trimmed.ends_with("-E"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_marker_rom_hack() {
        assert!(has_fan_content_marker("Pokemon Red ROM Hack"));
        assert!(has_fan_content_marker("Super Mario World romhack"));
    }

    #[test]
    fn test_fan_marker_fan_and_homebrew() {
        assert!(has_fan_content_marker("Metroid Fan Remake"));
        assert!(has_fan_content_marker("Zelda Homebrew Edition"));
    }

    #[test]
    fn test_fan_marker_does_not_match_fantasy() {
        assert!(!has_fan_content_marker("Final Fantasy VI"));
        assert!(!has_fan_content_marker("Fantasy Life"));
    }

    #[test]
    fn test_fan_marker_clean_titles() {
        assert!(!has_fan_content_marker("Pokemon Red"));
        assert!(!has_fan_content_marker("Super Mario Bros. 3"));
    }

    #[test]
    fn test_known_fan_developer() {
        assert!(is_known_fan_developer("Uranium Team"));
        assert!(is_known_fan_developer("InvoluntaryTwitch"));
        assert!(!is_known_fan_developer("Game Freak"));
    }

    #[test]
    fn test_ereader_suffix() {
        assert!(has_ereader_suffix("Super Mario Advance 4-e"));
        assert!(has_ereader_suffix("Excitebike-E "));
        assert!(!has_ereader_suffix("Metroid Fusion"));
        assert!(!has_ereader_suffix("e"));
    }
}
