//! Per-avatar action cooldowns measured in simulation months.

use std::collections::BTreeMap;

use cultivation_types::{AvatarId, MonthStamp};
use tracing::debug;

/// Remembers when each avatar last used each cooldown-gated action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    /// Last use keyed by `(avatar, action name)`.
    last_used: BTreeMap<(AvatarId, &'static str), MonthStamp>,
}

impl CooldownTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            last_used: BTreeMap::new(),
        }
    }

    /// Months left before `avatar` may use `action` again, or zero if ready.
    pub fn remaining(
        &self,
        avatar: AvatarId,
        action: &'static str,
        now: MonthStamp,
        cooldown_months: u32,
    ) -> u32 {
        self.last_used
            .get(&(avatar, action))
            .map_or(0, |last| cooldown_months.saturating_sub(now.months_since(*last)))
    }

    /// Whether `avatar` may use `action` at `now`.
    pub fn is_ready(
        &self,
        avatar: AvatarId,
        action: &'static str,
        now: MonthStamp,
        cooldown_months: u32,
    ) -> bool {
        self.remaining(avatar, action, now, cooldown_months) == 0
    }

    /// Record that `avatar` used `action` at `now`.
    pub fn record(&mut self, avatar: AvatarId, action: &'static str, now: MonthStamp) {
        debug!(%avatar, action, month = now.0, "cooldown started");
        self.last_used.insert((avatar, action), now);
    }

    /// Forget every cooldown held by `avatar`.
    pub fn clear_avatar(&mut self, avatar: AvatarId) {
        self.last_used.retain(|(holder, _), _| *holder != avatar);
    }
}
