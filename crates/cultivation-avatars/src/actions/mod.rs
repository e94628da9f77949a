//! Mutual actions: two-avatar actions that the target answers with feedback.
//!
//! Every mutual action follows the same lifecycle:
//!
//! 1. [`check_cooldown`] -- has the initiator used this action too recently?
//! 2. [`MutualAction::can_start`] -- action-specific gates.
//! 3. [`MutualAction::start`] -- narrate the opening event.
//! 4. [`MutualAction::settle_feedback`] -- apply the target's answer.
//! 5. [`MutualAction::finish`] -- narrate the result.
//!
//! The orchestration (collecting feedback, recording cooldowns, storing
//! events) lives in `cultivation-core`.

pub mod impart;

use cultivation_types::{Avatar, Event, Feedback, MonthStamp, RejectionReason};

use crate::cooldown::CooldownTracker;
use crate::error::AvatarError;
use crate::manager::{AvatarManager, AvatarRef};
use crate::observation::ObservationPredicate;
use crate::relations::RelationGraph;

/// Read-only world view handed to action gates and narration.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    /// Living avatars.
    pub avatars: &'a AvatarManager,
    /// The relation graph.
    pub relations: &'a RelationGraph,
    /// Observation-range predicate.
    pub observation: &'a dyn ObservationPredicate,
    /// The current simulation month.
    pub now: MonthStamp,
}

impl core::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionContext")
            .field("avatars", &self.avatars.len())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// A two-avatar action answered by the target.
pub trait MutualAction {
    /// Stable action name, also used as the cooldown key.
    const NAME: &'static str;

    /// Months between uses by the same initiator; zero means no cooldown.
    fn cooldown_months(&self) -> u32;

    /// Feedback the target may give.
    fn feedback_options(&self) -> &'static [Feedback] {
        &[Feedback::Accept, Feedback::Reject]
    }

    /// Action-specific start conditions.
    ///
    /// # Errors
    ///
    /// Returns the first [`RejectionReason`] that applies.
    fn can_start(
        &self,
        ctx: &ActionContext<'_>,
        initiator: &Avatar,
        target: &AvatarRef,
    ) -> Result<(), RejectionReason>;

    /// Begin the action and narrate it.
    fn start(&mut self, ctx: &ActionContext<'_>, initiator: &Avatar, target: &AvatarRef) -> Event;

    /// Apply the target's answer.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError`] if applying the outcome fails.
    fn settle_feedback(
        &mut self,
        avatars: &mut AvatarManager,
        target: &AvatarRef,
        feedback: Feedback,
    ) -> Result<(), AvatarError>;

    /// Narrate the result of the action.
    fn finish(&mut self, ctx: &ActionContext<'_>, initiator: &Avatar, target: &AvatarRef)
    -> Vec<Event>;
}

/// Reject the action if `initiator` is still cooling down from a previous use.
///
/// # Errors
///
/// Returns [`RejectionReason::OnCooldown`] with the months left.
pub fn check_cooldown<A: MutualAction>(
    action: &A,
    cooldowns: &CooldownTracker,
    initiator: &Avatar,
    now: MonthStamp,
) -> Result<(), RejectionReason> {
    let remaining = cooldowns.remaining(initiator.id, A::NAME, now, action.cooldown_months());
    if remaining > 0 {
        return Err(RejectionReason::OnCooldown {
            remaining_months: remaining,
        });
    }
    Ok(())
}
