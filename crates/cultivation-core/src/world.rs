//! The world container: calendar, avatars, relations, cooldowns, and the
//! event log.
//!
//! [`World`] bundles the state that mutual actions read and mutate. The
//! month counter is the single clock; cooldowns and event stamps derive from
//! it.

use cultivation_avatars::{
    ActionContext, AvatarError, AvatarManager, CooldownTracker, ObservationRange, RelationGraph,
};
use cultivation_types::{Avatar, AvatarId, Event, MonthStamp};
use tracing::debug;

/// Errors raised by world-level bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The month counter would overflow.
    #[error("month counter overflow: cannot advance beyond {0}")]
    ClockOverflow(MonthStamp),

    /// An avatar or relation mutation failed.
    #[error("avatar error: {source}")]
    Avatar {
        /// The underlying avatar error.
        #[from]
        source: AvatarError,
    },
}

/// Simulation state shared by every action.
#[derive(Debug, Clone)]
pub struct World {
    /// The current month.
    now: MonthStamp,
    /// Living avatars.
    pub avatars: AvatarManager,
    /// Relations between avatars.
    pub relations: RelationGraph,
    /// Per-avatar action cooldowns.
    pub cooldowns: CooldownTracker,
    /// How far avatars can see.
    observation: ObservationRange,
    /// Every event recorded so far, oldest first.
    events: Vec<Event>,
}

impl World {
    /// Create an empty world starting at `start`.
    pub const fn new(start: MonthStamp, observation: ObservationRange) -> Self {
        Self {
            now: start,
            avatars: AvatarManager::new(),
            relations: RelationGraph::new(),
            cooldowns: CooldownTracker::new(),
            observation,
            events: Vec::new(),
        }
    }

    /// The current month.
    pub const fn now(&self) -> MonthStamp {
        self.now
    }

    /// Advance the calendar by one month.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ClockOverflow`] if the month counter overflows.
    pub fn advance_month(&mut self) -> Result<MonthStamp, WorldError> {
        self.now = self
            .now
            .checked_add_months(1)
            .ok_or(WorldError::ClockOverflow(self.now))?;
        debug!(month = %self.now, "month advanced");
        Ok(self.now)
    }

    /// A read-only view for action gates and narration.
    pub fn context(&self) -> ActionContext<'_> {
        ActionContext {
            avatars: &self.avatars,
            relations: &self.relations,
            observation: &self.observation,
            now: self.now,
        }
    }

    /// Append events to the log.
    pub fn record_events(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.extend(events);
    }

    /// Every recorded event, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Remove an avatar along with its relations and cooldowns.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Avatar`] if the avatar does not exist.
    pub fn remove_avatar(&mut self, id: AvatarId) -> Result<Avatar, WorldError> {
        let avatar = self.avatars.remove(id)?;
        let dropped = self.relations.remove_avatar(id);
        self.cooldowns.clear_avatar(id);
        debug!(avatar = %avatar.name, relations_dropped = dropped, "avatar removed");
        Ok(avatar)
    }
}
