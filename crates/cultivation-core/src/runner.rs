//! Drives one mutual action through its lifecycle against a [`World`].
//!
//! Order of operations:
//!
//! 1. Resolve the initiator (a missing initiator is a caller bug, so it is
//!    an error rather than a rejection).
//! 2. Cooldown gate, then the action's own start gate. Either may reject.
//! 3. Narrate the opening event, log it, and start the initiator's
//!    cooldown. From here on the attempt counts even if settling fails.
//! 4. Ask the [`FeedbackSource`] for the target's answer and settle it.
//! 5. Narrate the result and log it.

use cultivation_avatars::{
    AvatarError, AvatarRef, CultivationConfig, Impart, ImpartConfig, MutualAction,
    check_cooldown,
};
use cultivation_types::{AvatarId, Event, Feedback, RejectionReason};
use tracing::{debug, info};

use crate::feedback::FeedbackSource;
use crate::world::World;

/// Errors that abort a mutual action.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Avatar lookup or mutation failed.
    #[error("avatar error: {source}")]
    Avatar {
        /// The underlying avatar error.
        #[from]
        source: AvatarError,
    },
}

/// How a mutual action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A gate refused the action; nothing changed.
    Rejected(RejectionReason),
    /// The action ran to completion.
    Completed {
        /// The target's answer.
        feedback: Feedback,
        /// Events produced, opening event first.
        events: Vec<Event>,
    },
}

impl ActionOutcome {
    /// Whether the action was refused at a gate.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Run `action` from `initiator` toward `target`.
///
/// # Errors
///
/// Returns [`RunnerError::Avatar`] if the initiator does not exist or
/// settling the feedback fails.
pub fn run_mutual_action<A, F>(
    world: &mut World,
    action: &mut A,
    initiator: AvatarId,
    target: &AvatarRef,
    feedback_source: &mut F,
) -> Result<ActionOutcome, RunnerError>
where
    A: MutualAction,
    F: FeedbackSource,
{
    let initiator = world
        .avatars
        .get(initiator)
        .cloned()
        .ok_or(AvatarError::AvatarNotFound(initiator))?;

    let gate = check_cooldown(action, &world.cooldowns, &initiator, world.now())
        .and_then(|()| action.can_start(&world.context(), &initiator, target));
    if let Err(reason) = gate {
        debug!(
            action = A::NAME,
            initiator = %initiator.name,
            %target,
            %reason,
            "mutual action rejected"
        );
        return Ok(ActionOutcome::Rejected(reason));
    }

    // A spent cooldown always has its opening event on record.
    let opening = action.start(&world.context(), &initiator, target);
    world.cooldowns.record(initiator.id, A::NAME, world.now());
    world.record_events([opening.clone()]);
    let mut events = vec![opening];

    let feedback = match world.avatars.resolve(target) {
        Some(receiver) => feedback_source.feedback(
            A::NAME,
            &initiator,
            receiver,
            action.feedback_options(),
        ),
        None => Feedback::Reject,
    };
    action.settle_feedback(&mut world.avatars, target, feedback)?;

    let results = action.finish(&world.context(), &initiator, target);
    world.record_events(results.iter().cloned());
    events.extend(results);

    info!(
        action = A::NAME,
        initiator = %initiator.name,
        %target,
        ?feedback,
        events = events.len(),
        "mutual action completed"
    );
    Ok(ActionOutcome::Completed { feedback, events })
}

/// Run the impart action with the given tuning.
///
/// # Errors
///
/// See [`run_mutual_action`].
pub fn impart<F: FeedbackSource>(
    world: &mut World,
    config: &ImpartConfig,
    cultivation: &CultivationConfig,
    initiator: AvatarId,
    target: &AvatarRef,
    feedback_source: &mut F,
) -> Result<ActionOutcome, RunnerError> {
    let mut action = Impart::new(config.clone(), cultivation.clone());
    run_mutual_action(world, &mut action, initiator, target, feedback_source)
}
