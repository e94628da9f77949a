//! Avatar registry, relation graph, lineage checks, and mutual actions for
//! the cultivation simulation.
//!
//! This crate is the logic layer: everything here operates on in-memory
//! state without touching I/O. It sits between `cultivation-types` (plain
//! data) and `cultivation-core` (configuration and orchestration).
//!
//! # Modules
//!
//! - [`actions`] -- Mutual-action lifecycle and the [`Impart`] action
//! - [`config`] -- Tunables for imparting and cultivation ([`ImpartConfig`])
//! - [`cooldown`] -- Per-avatar action cooldowns ([`CooldownTracker`])
//! - [`cultivation`] -- Level-up and breakthrough rules
//! - [`error`] -- Error types for registry and relation mutations ([`AvatarError`])
//! - [`lineage`] -- Depth-capped downstream-junior search ([`is_descendant`])
//! - [`manager`] -- Avatar creation and lookup ([`AvatarManager`])
//! - [`observation`] -- Observation-range predicate ([`ObservationRange`])
//! - [`relations`] -- Relation graph registry ([`RelationGraph`])

pub mod actions;
pub mod config;
pub mod cooldown;
pub mod cultivation;
pub mod error;
pub mod lineage;
pub mod manager;
pub mod observation;
pub mod relations;

// Re-export primary types at crate root for convenience.
pub use actions::impart::Impart;
pub use actions::{ActionContext, MutualAction, check_cooldown};
pub use config::{CultivationConfig, ImpartConfig};
pub use cooldown::CooldownTracker;
pub use error::AvatarError;
pub use lineage::{DepthLimits, eligible_juniors, is_allowed_downward_target, is_descendant};
pub use manager::{AvatarManager, AvatarMut, AvatarRef, NewAvatar};
pub use observation::{ObservationPredicate, ObservationRange};
pub use relations::{RelationGraph, RelationSource};
