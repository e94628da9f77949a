//! Error types for the cultivation-avatars crate.
//!
//! Registry and relation mutations return typed errors rather than
//! panicking. Action gates do not use these: a refused action is a
//! [`RejectionReason`](cultivation_types::RejectionReason), not an error.

use cultivation_types::AvatarId;

/// Errors that can occur while mutating avatars or their relations.
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    /// Avatar with the given ID was not found in the manager.
    #[error("avatar not found: {0}")]
    AvatarNotFound(AvatarId),

    /// Avatar name already exists in the manager.
    #[error("duplicate avatar name: {0}")]
    DuplicateName(String),

    /// An avatar cannot hold a relation toward itself.
    #[error("avatar {0} cannot relate to itself")]
    SelfRelation(AvatarId),

    /// An arithmetic overflow occurred during a cultivation computation.
    #[error("arithmetic overflow in cultivation computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// A breakthrough was attempted by an avatar that is not at a bottleneck.
    #[error("avatar at level {level} is not at a realm bottleneck")]
    NotAtBottleneck {
        /// The avatar's current level.
        level: u32,
    },
}
