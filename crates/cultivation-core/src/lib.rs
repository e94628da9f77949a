//! Configuration, world state, and mutual-action orchestration for the
//! cultivation simulation.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `cultivation-config.yaml` into
//!   strongly-typed structs.
//! - [`feedback`] -- [`FeedbackSource`] trait and [`FixedFeedback`].
//! - [`runner`] -- Runs a mutual action through cooldown, gates, feedback,
//!   and narration.
//! - [`world`] -- The [`World`] container and its month clock.
//!
//! [`FeedbackSource`]: feedback::FeedbackSource
//! [`FixedFeedback`]: feedback::FixedFeedback
//! [`World`]: world::World

pub mod config;
pub mod feedback;
pub mod runner;
pub mod world;
