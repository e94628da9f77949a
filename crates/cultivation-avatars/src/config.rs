//! Tunable parameters for the impart action and cultivation progress.
//!
//! Both structs deserialize from the `impart` and `cultivation` keys of
//! `cultivation-config.yaml`; any missing key falls back to the defaults
//! listed on each field.

use std::collections::BTreeSet;

use cultivation_types::Relation;
use serde::Deserialize;

use crate::lineage::DepthLimits;

/// Configuration for the impart mutual action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImpartConfig {
    /// Maximum family generations between giver and receiver (default: 2).
    #[serde(default = "default_max_depth")]
    pub max_depth_family: u32,

    /// Maximum sect generations between giver and receiver (default: 2).
    #[serde(default = "default_max_depth")]
    pub max_depth_sect: u32,

    /// Relation kinds the lineage search may follow
    /// (default: `IsChildOf`, `IsDiscipleOf`).
    #[serde(default = "default_edge_kinds")]
    pub edge_kinds: BTreeSet<Relation>,

    /// Minimum level by which the giver must exceed the receiver (default: 20).
    #[serde(default = "default_min_level_gap")]
    pub min_level_gap: u32,

    /// Experience granted to the receiver on acceptance (default: 2000).
    #[serde(default = "default_exp_gain")]
    pub exp_gain: u64,

    /// Months before the same giver may impart again (default: 6).
    #[serde(default = "default_cooldown_months")]
    pub cooldown_months: u32,
}

impl Default for ImpartConfig {
    fn default() -> Self {
        Self {
            max_depth_family: default_max_depth(),
            max_depth_sect: default_max_depth(),
            edge_kinds: default_edge_kinds(),
            min_level_gap: default_min_level_gap(),
            exp_gain: default_exp_gain(),
            cooldown_months: default_cooldown_months(),
        }
    }
}

impl ImpartConfig {
    /// The per-axis depth caps for the lineage search.
    pub const fn depth_limits(&self) -> DepthLimits {
        DepthLimits {
            family: self.max_depth_family,
            sect: self.max_depth_sect,
        }
    }
}

const fn default_max_depth() -> u32 {
    2
}

fn default_edge_kinds() -> BTreeSet<Relation> {
    BTreeSet::from([Relation::IsChildOf, Relation::IsDiscipleOf])
}

const fn default_min_level_gap() -> u32 {
    20
}

const fn default_exp_gain() -> u64 {
    // 100 exp per lesson, 5 lessons a month, 4 months of instruction.
    100 * 5 * 4
}

const fn default_cooldown_months() -> u32 {
    6
}

/// Configuration for cultivation level-ups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CultivationConfig {
    /// Experience per level required to advance (default: 100).
    ///
    /// Advancing from level N needs `N * exp_per_level` experience.
    #[serde(default = "default_exp_per_level")]
    pub exp_per_level: u64,

    /// Highest reachable level (default: 120).
    #[serde(default = "default_max_level")]
    pub max_level: u32,
}

impl Default for CultivationConfig {
    fn default() -> Self {
        Self {
            exp_per_level: default_exp_per_level(),
            max_level: default_max_level(),
        }
    }
}

const fn default_exp_per_level() -> u64 {
    100
}

const fn default_max_level() -> u32 {
    120
}
