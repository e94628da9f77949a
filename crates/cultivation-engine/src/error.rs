//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

use cultivation_avatars::AvatarError;
use cultivation_core::config::ConfigError;
use cultivation_core::runner::RunnerError;
use cultivation_core::world::WorldError;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// World bookkeeping failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A mutual action aborted.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: RunnerError,
    },

    /// Avatar creation or relation setup failed.
    #[error("avatar error: {source}")]
    Avatar {
        /// The underlying avatar error.
        #[from]
        source: AvatarError,
    },

    /// The configured start year cannot be placed on the month calendar.
    #[error("start year {year} is out of range")]
    InvalidStartYear {
        /// The rejected year.
        year: u32,
    },

    /// Lineage seeding failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}
