//! Feedback source trait and a fixed-answer implementation.
//!
//! When a mutual action starts, the target answers it. The
//! [`FeedbackSource`] trait abstracts who answers: a scripted policy, a
//! random roll, a human player, or a test stub.

use cultivation_types::{Avatar, Feedback};

/// A source of target answers for mutual actions.
pub trait FeedbackSource {
    /// Choose `target`'s answer to `action` started by `initiator`.
    ///
    /// The answer should be one of `options`; anything else is treated by
    /// the action as a rejection.
    fn feedback(
        &mut self,
        action: &'static str,
        initiator: &Avatar,
        target: &Avatar,
        options: &[Feedback],
    ) -> Feedback;
}

/// A feedback source that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFeedback(pub Feedback);

impl FeedbackSource for FixedFeedback {
    fn feedback(
        &mut self,
        _action: &'static str,
        _initiator: &Avatar,
        _target: &Avatar,
        _options: &[Feedback],
    ) -> Feedback {
        self.0
    }
}
