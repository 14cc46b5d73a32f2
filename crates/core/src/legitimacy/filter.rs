//! Content-legitimacy filter.
//!
//! Pure and total: no I/O, never fails. Manual override flags are
//! evaluated before any policy tier logic.

use crate::catalog::{CatalogRecord, GameCategory};

use super::policy::{self, PolicyTier};
use super::predicates;

/// Why a record was removed, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Redlighted,
    MicroContent,
    ModOrHack,
    FanMade,
}

/// Apply the legitimacy policy to a candidate list.
pub fn filter_records(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    records
        .into_iter()
        .filter(|r| removal_reason(r).is_none())
        .collect()
}

/// Decide whether a single record should be removed, and why.
///
/// Precedence: greenlight keeps unconditionally, redlight removes
/// unconditionally, then micro-content and tier rules apply.
pub fn removal_reason(record: &CatalogRecord) -> Option<RemovalReason> {
    match record.override_verdict() {
        Some(true) => return None,
        Some(false) => return Some(RemovalReason::Redlighted),
        None => {}
    }

    // e-Reader and episodic micro-content is removed on every tier.
    if matches!(record.category, GameCategory::EReader | GameCategory::Season)
        || predicates::has_ereader_suffix(&record.name)
    {
        return Some(RemovalReason::MicroContent);
    }

    match policy::tier_for(record) {
        PolicyTier::Permissive => None,
        PolicyTier::Moderate => {
            // Only clearly illegitimate: mod/hack category carrying a
            // fan-content marker in the title.
            if record.category == GameCategory::ModOrHack
                && predicates::has_fan_content_marker(&record.name)
            {
                Some(RemovalReason::ModOrHack)
            } else {
                None
            }
        }
        PolicyTier::Strict => strict_removal(record),
    }
}

fn strict_removal(record: &CatalogRecord) -> Option<RemovalReason> {
    if record.category == GameCategory::ModOrHack {
        return Some(RemovalReason::ModOrHack);
    }
    if predicates::has_fan_content_marker(&record.name) {
        return Some(RemovalReason::FanMade);
    }
    let fan_outfit = [record.developer.as_deref(), record.publisher.as_deref()]
        .iter()
        .flatten()
        .any(|name| predicates::is_known_fan_developer(name));
    if fan_outfit {
        return Some(RemovalReason::FanMade);
    }
    None
}
