//! Observation range: can one avatar see (and so interact with) another?
//!
//! Mutual actions only consider the predicate's verdict. An implementation
//! that cannot decide must answer `false`; there is no error path.

use cultivation_types::Avatar;
use serde::Deserialize;

/// Decides whether `target` is within `observer`'s observation range.
pub trait ObservationPredicate {
    /// `true` if `observer` can currently interact with `target`.
    fn is_within_observation(&self, observer: &Avatar, target: &Avatar) -> bool;
}

impl<F> ObservationPredicate for F
where
    F: Fn(&Avatar, &Avatar) -> bool,
{
    fn is_within_observation(&self, observer: &Avatar, target: &Avatar) -> bool {
        self(observer, target)
    }
}

/// Grid-distance observation: a square radius that widens with the
/// observer's realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ObservationRange {
    /// Radius in tiles for a Qi Refinement observer (default: 3).
    #[serde(default = "default_base_radius")]
    pub base_radius: u32,

    /// Extra tiles per realm above Qi Refinement (default: 2).
    #[serde(default = "default_per_realm_bonus")]
    pub per_realm_bonus: u32,
}

impl Default for ObservationRange {
    fn default() -> Self {
        Self {
            base_radius: default_base_radius(),
            per_realm_bonus: default_per_realm_bonus(),
        }
    }
}

impl ObservationRange {
    /// The radius available to `observer`.
    pub const fn radius_for(&self, observer: &Avatar) -> u32 {
        let bonus = self
            .per_realm_bonus
            .saturating_mul(observer.cultivation.realm().rank());
        self.base_radius.saturating_add(bonus)
    }
}

impl ObservationPredicate for ObservationRange {
    fn is_within_observation(&self, observer: &Avatar, target: &Avatar) -> bool {
        let dx = i64::from(observer.pos_x).abs_diff(i64::from(target.pos_x));
        let dy = i64::from(observer.pos_y).abs_diff(i64::from(target.pos_y));
        dx.max(dy) <= u64::from(self.radius_for(observer))
    }
}

const fn default_base_radius() -> u32 {
    3
}

const fn default_per_realm_bonus() -> u32 {
    2
}
