//! Types for catalog records consumed by the search pipeline.
//!
//! Records are owned and persisted by the backing store; this crate only
//! reads them. Manual override flags are written by the admin flagging
//! tool and are read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Release category of a catalog record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameCategory {
    MainGame,
    ModOrHack,
    Port,
    Remaster,
    Bundle,
    /// Season of an episodic release.
    Season,
    /// e-Reader micro-content (card-scanned minigames).
    EReader,
    Other,
}

impl Default for GameCategory {
    fn default() -> Self {
        GameCategory::MainGame
    }
}

/// Which backend a record was retrieved from, for diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    LocalStore,
    ExternalCatalog,
}

/// A game entry from the local store or the external catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable local store id.
    pub id: String,
    /// External catalog id (IGDB-style), if the record is linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<u64>,
    /// Game name.
    pub name: String,
    /// Alternative titles (regional names, abbreviations), matched as
    /// secondary relevance targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    /// Short description, used as a secondary relevance target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default)]
    pub category: GameCategory,
    /// Critic/user blended rating, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rating: Option<f64>,
    /// Number of ratings behind `total_rating`.
    #[serde(default)]
    pub rating_count: u32,
    /// Follower count on the external catalog.
    #[serde(default)]
    pub follows: u32,
    /// Pre-release hype count on the external catalog.
    #[serde(default)]
    pub hypes: u32,
    /// First release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    /// External id of the original this record derives from
    /// (remaster/port lineage).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Manual override: force-include and boost.
    #[serde(default)]
    pub greenlight: bool,
    /// Manual override: force-exclude.
    #[serde(default)]
    pub redlight: bool,
    /// Free-text reason recorded with an override flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
    /// Who set the override flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged_by: Option<String>,
    /// When the override flag was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged_at: Option<DateTime<Utc>>,
}

impl CatalogRecord {
    /// Manual override verdict, evaluated before any policy logic.
    ///
    /// `Some(true)` = force-keep, `Some(false)` = force-drop, `None` =
    /// no override. Greenlight takes precedence when both flags are set
    /// (a data-entry anomaly the store should prevent).
    pub fn override_verdict(&self) -> Option<bool> {
        if self.greenlight {
            Some(true)
        } else if self.redlight {
            Some(false)
        } else {
            None
        }
    }

    /// Derived popularity signal combining follows and hype.
    ///
    /// Hype is pre-release noise, weighted below established follows.
    pub fn popularity_score(&self) -> f64 {
        self.follows as f64 + self.hypes as f64 * 0.5
    }

    /// Whether this record derives from another release (remaster/port).
    pub fn is_derivative(&self) -> bool {
        self.parent_id.is_some()
    }
}
