//! Content-legitimacy filtering: publisher policy tiers, fan-content
//! predicates and manual override precedence.

mod filter;
mod policy;
mod predicates;

pub use filter::{filter_records, removal_reason, RemovalReason};
pub use policy::{policy_for, tier_for, PolicyTier, PublisherPolicy, POLICIES};
pub use predicates::{has_ereader_suffix, has_fan_content_marker, is_known_fan_developer};
