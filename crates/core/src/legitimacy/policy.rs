//! Per-publisher copyright policy tiers.
//!
//! A record falls under a company's policy either because its publisher
//! or developer matches one of the company's official names, or because
//! its title belongs to a franchise the company owns. Companies absent
//! from the table are permissive.

use crate::catalog::CatalogRecord;
use crate::franchise;
use crate::text::fuzzy_contains;

/// Strictness applied when filtering unofficial/derivative content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyTier {
    /// Official releases only. Fan-made content is removed even when
    /// miscategorized as a main game.
    Strict,
    /// Only clearly illegitimate items removed.
    Moderate,
    /// No filtering.
    Permissive,
}

/// Policy entry for one rights holder.
#[derive(Debug)]
pub struct PublisherPolicy {
    pub company: &'static str,
    pub tier: PolicyTier,
    /// Official publisher/developer names, matched fuzzily in both
    /// directions ("GameFreak" vs "game freak").
    pub aliases: &'static [&'static str],
    /// Franchise slugs (see [`franchise::SERIES`]) owned by the company.
    pub franchises: &'static [&'static str],
}

pub static POLICIES: &[PublisherPolicy] = &[
    PublisherPolicy {
        company: "Nintendo",
        tier: PolicyTier::Strict,
        aliases: &[
            "nintendo",
            "game freak",
            "the pokemon company",
            "creatures inc",
            "hal laboratory",
            "intelligent systems",
            "retro studios",
        ],
        franchises: &["pokemon", "mario", "zelda", "metroid", "kirby"],
    },
    PublisherPolicy {
        company: "Square Enix",
        tier: PolicyTier::Moderate,
        aliases: &["square enix", "squaresoft", "square", "enix"],
        franchises: &["final-fantasy", "dragon-quest"],
    },
    PublisherPolicy {
        company: "Sega",
        tier: PolicyTier::Moderate,
        aliases: &["sega", "sonic team"],
        franchises: &["sonic"],
    },
    PublisherPolicy {
        company: "Capcom",
        tier: PolicyTier::Moderate,
        aliases: &["capcom"],
        franchises: &["mega-man"],
    },
    PublisherPolicy {
        company: "Konami",
        tier: PolicyTier::Moderate,
        aliases: &["konami"],
        franchises: &["castlevania"],
    },
];

/// Find the policy governing a record, if any.
pub fn policy_for(record: &CatalogRecord) -> Option<&'static PublisherPolicy> {
    // Publisher/developer match takes precedence over franchise lookup.
    for policy in POLICIES {
        if matches_company(record, policy) {
            return Some(policy);
        }
    }
    let slug = franchise::detect(&record.name).map(|m| m.series.slug)?;
    POLICIES.iter().find(|p| p.franchises.contains(&slug))
}

/// Policy tier for a record; permissive when no policy applies.
pub fn tier_for(record: &CatalogRecord) -> PolicyTier {
    policy_for(record).map(|p| p.tier).unwrap_or(PolicyTier::Permissive)
}

fn matches_company(record: &CatalogRecord, policy: &PublisherPolicy) -> bool {
    let fields = [record.publisher.as_deref(), record.developer.as_deref()];
    fields.iter().flatten().any(|field| {
        policy.aliases.iter().any(|alias| fuzzy_contains(field, alias))
    })
}
