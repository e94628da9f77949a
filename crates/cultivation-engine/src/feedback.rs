//! Random feedback source: receivers accept with a configured probability.

use cultivation_core::feedback::FeedbackSource;
use cultivation_types::{Avatar, Feedback};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::trace;

/// Answers mutual actions with a seeded dice roll.
#[derive(Debug, Clone)]
pub struct RandomFeedback {
    rng: StdRng,
    accept_chance_pct: u32,
}

impl RandomFeedback {
    /// Create a source that accepts `accept_chance_pct` percent of the time.
    pub const fn new(rng: StdRng, accept_chance_pct: u32) -> Self {
        Self {
            rng,
            accept_chance_pct,
        }
    }
}

impl FeedbackSource for RandomFeedback {
    fn feedback(
        &mut self,
        action: &'static str,
        initiator: &Avatar,
        target: &Avatar,
        options: &[Feedback],
    ) -> Feedback {
        let roll: u32 = self.rng.random_range(0..100);
        let answer = if roll < self.accept_chance_pct && options.contains(&Feedback::Accept) {
            Feedback::Accept
        } else {
            Feedback::Reject
        };
        trace!(
            action,
            initiator = %initiator.name,
            target = %target.name,
            roll,
            ?answer,
            "feedback rolled"
        );
        answer
    }
}
