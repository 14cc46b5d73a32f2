//! Fixture constructors for pipeline tests.

use chrono::{TimeZone, Utc};

use crate::catalog::{CatalogRecord, GameCategory};

/// A minimal main-game record with no signals set.
pub fn record(id: &str, name: &str) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        external_id: None,
        name: name.to_string(),
        alternative_names: Vec::new(),
        summary: None,
        developer: None,
        publisher: None,
        category: GameCategory::MainGame,
        total_rating: None,
        rating_count: 0,
        follows: 0,
        hypes: 0,
        release_date: None,
        parent_id: None,
        greenlight: false,
        redlight: false,
        flag_reason: None,
        flagged_by: None,
        flagged_at: None,
    }
}

/// An official release with a publisher, rating signals and a release
/// year.
pub fn official(id: &str, name: &str, publisher: &str, year: i32) -> CatalogRecord {
    let mut r = record(id, name);
    r.publisher = Some(publisher.to_string());
    r.total_rating = Some(85.0);
    r.rating_count = 800;
    r.follows = 2000;
    r.release_date = Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap());
    r
}

/// A fan-made title carrying a main-game category, the shape that slips
/// past naive category filters.
pub fn fan_made(id: &str, name: &str, developer: &str) -> CatalogRecord {
    let mut r = record(id, name);
    r.developer = Some(developer.to_string());
    r.category = GameCategory::MainGame;
    r
}

/// A greenlit mod, force-included by manual override.
pub fn greenlit_mod(id: &str, name: &str) -> CatalogRecord {
    let mut r = record(id, name);
    r.category = GameCategory::ModOrHack;
    r.greenlight = true;
    r.flag_reason = Some("community classic".to_string());
    r.flagged_by = Some("admin".to_string());
    r.flagged_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    r
}
