//! Simulation binary for the cultivation world.
//!
//! Seeds a world with family clans and sects, then advances the calendar
//! one month at a time. Each month a handful of elders try to impart
//! cultivation knowledge to juniors; the lineage gate, observation range,
//! level gap, and cooldown decide who may. Every accepted or refused
//! attempt is narrated through structured logs.
//!
//! # Startup Sequence
//!
//! 1. Resolve the config path (first argument, `CULTIVATION_CONFIG`, or
//!    `cultivation-config.yaml`)
//! 2. Load configuration, falling back to defaults when the file is absent
//! 3. Initialize structured logging (tracing)
//! 4. Seed clans and sects from the `spawner` section
//! 5. Run the monthly impart loop until the configured month count or
//!    Ctrl-C
//! 6. Log the run summary

mod error;
mod feedback;
mod spawner;

use std::path::{Path, PathBuf};
use std::time::Duration;

use cultivation_avatars::{
    AvatarRef, CultivationConfig, ImpartConfig, cultivation, eligible_juniors,
};
use cultivation_core::config::{LoggingConfig, SimulationConfig};
use cultivation_core::runner::{self, ActionOutcome};
use cultivation_core::world::World;
use cultivation_types::{AvatarId, Event, Feedback, Month, MonthStamp};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::feedback::RandomFeedback;
use crate::spawner::SpawnerConfig;

/// Config file read when neither an argument nor `CULTIVATION_CONFIG` is given.
const DEFAULT_CONFIG_PATH: &str = "cultivation-config.yaml";

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "CULTIVATION_CONFIG";

/// Percentage of impart attempts aimed at a random avatar instead of a
/// known junior. These exercise the rejection paths.
const STRAY_TARGET_PCT: u32 = 20;

/// Application entry point for the cultivation engine.
///
/// # Errors
///
/// Returns an error if configuration loading, seeding, or the simulation
/// itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1-2. Resolve and load configuration.
    let config_path =
        resolve_config_path(std::env::args().nth(1), std::env::var(CONFIG_ENV).ok());
    let (config, found) = load_config(&config_path)?;

    // 3. Initialize structured logging.
    init_logging(&config.logging);
    info!("cultivation-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        start_year = config.world.start_year,
        months_to_run = config.world.months_to_run,
        month_interval_ms = config.world.month_interval_ms,
        "World configuration"
    );

    // 4. Seed lineages.
    let spawner_config = load_spawner_config(&config_path)?;
    let start = MonthStamp::from_year_month(config.world.start_year, Month::January).ok_or(
        EngineError::InvalidStartYear {
            year: config.world.start_year,
        },
    )?;
    let mut world = World::new(start, config.observation);
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let seeded = spawner::spawn_lineages(&mut world, &spawner_config, &mut rng)?;
    info!(
        founders = seeded.founders.len(),
        avatars = seeded.spawned,
        "Seed avatars spawned"
    );

    // 5. Run.
    let stats = run_simulation(&mut world, &config, &mut rng).await?;

    // 6. Summary.
    info!(
        months = stats.months,
        attempts = stats.attempts,
        rejected = stats.rejected,
        accepted = stats.accepted,
        refused = stats.refused,
        breakthroughs = stats.breakthroughs,
        events = world.events().len(),
        final_month = %world.now(),
        "Simulation finished"
    );
    for avatar in &world.avatars {
        debug!(
            name = %avatar.name,
            level = avatar.cultivation.level,
            realm = %avatar.cultivation.realm(),
            "Final cultivation"
        );
    }

    Ok(())
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunStats {
    months: u32,
    attempts: u32,
    rejected: u32,
    accepted: u32,
    refused: u32,
    breakthroughs: u32,
}

impl RunStats {
    fn record(&mut self, outcome: &ActionOutcome) {
        self.attempts = self.attempts.saturating_add(1);
        let counter = match outcome {
            ActionOutcome::Rejected(_) => &mut self.rejected,
            ActionOutcome::Completed {
                feedback: Feedback::Accept,
                ..
            } => &mut self.accepted,
            ActionOutcome::Completed {
                feedback: Feedback::Reject,
                ..
            } => &mut self.refused,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Advance the world month by month until the configured count or Ctrl-C.
async fn run_simulation(
    world: &mut World,
    config: &SimulationConfig,
    rng: &mut StdRng,
) -> Result<RunStats, EngineError> {
    let mut feedback = RandomFeedback::new(
        StdRng::seed_from_u64(config.world.seed.wrapping_add(1)),
        config.world.accept_chance_pct,
    );
    let period = Duration::from_millis(config.world.month_interval_ms.max(1));
    let mut ticker = tokio::time::interval(period);
    let mut stats = RunStats::default();

    while stats.months < config.world.months_to_run {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!(month = %world.now(), "Interrupted, stopping");
                break;
            }
        }

        for _ in 0..config.world.imparts_per_month {
            let Some((initiator, target)) = pick_impart_pair(world, &config.impart, rng) else {
                debug!(month = %world.now(), "Picked avatar has no one to teach");
                continue;
            };
            let outcome = runner::impart(
                world,
                &config.impart,
                &config.cultivation,
                initiator,
                &AvatarRef::Id(target),
                &mut feedback,
            )?;
            stats.record(&outcome);
        }

        let broke_through = attempt_breakthroughs(world, &config.cultivation)?;
        stats.breakthroughs = stats.breakthroughs.saturating_add(broke_through);

        world.advance_month()?;
        stats.months = stats.months.saturating_add(1);
    }

    Ok(stats)
}

/// Pick an initiator and a target for one impart attempt.
///
/// Usually the target is one of the initiator's eligible juniors; now and
/// then it is any other avatar, which the gates are expected to refuse.
/// Returns `None` when the world is empty or the chosen initiator has no
/// one to aim at.
fn pick_impart_pair(
    world: &World,
    config: &ImpartConfig,
    rng: &mut impl Rng,
) -> Option<(AvatarId, AvatarId)> {
    let initiator = world.avatars.iter().map(|a| a.id).choose(rng)?;

    let target = if rng.random_range(0..100) < STRAY_TARGET_PCT {
        world
            .avatars
            .iter()
            .map(|a| a.id)
            .filter(|&id| id != initiator)
            .choose(rng)?
    } else {
        eligible_juniors(
            &world.relations,
            initiator,
            &config.edge_kinds,
            config.depth_limits(),
        )
        .into_iter()
        .choose(rng)?
    };

    Some((initiator, target))
}

/// Let every avatar stuck at a realm boundary try to break through.
///
/// Returns how many succeeded. Each success is recorded as an event.
fn attempt_breakthroughs(
    world: &mut World,
    config: &CultivationConfig,
) -> Result<u32, EngineError> {
    let stuck: Vec<AvatarId> = world
        .avatars
        .iter()
        .filter(|a| cultivation::is_at_bottleneck(&a.cultivation, config))
        .map(|a| a.id)
        .collect();

    let now = world.now();
    let mut events = Vec::new();
    for id in stuck {
        let Some(mut avatar) = world.avatars.get_mut(id) else {
            continue;
        };
        if cultivation::break_through(avatar.cultivation_mut(), config)? {
            info!(name = %avatar.name, realm = %avatar.cultivation.realm(), "Breakthrough");
            events.push(Event::new(
                now,
                format!(
                    "{} broke through to the {} realm",
                    avatar.name,
                    avatar.cultivation.realm()
                ),
                vec![id],
            ));
        }
    }

    let count = u32::try_from(events.len()).unwrap_or(u32::MAX);
    world.record_events(events);
    Ok(count)
}

/// Choose the config file: explicit argument, then environment, then the
/// default file name.
fn resolve_config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration from `path`.
///
/// Returns the defaults when the file does not exist. The flag reports
/// whether the file was found.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        let config = SimulationConfig::from_file(path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}

/// Load spawner configuration from the `spawner` section of `path`.
///
/// If the file does not exist or lacks the `spawner` key, defaults are used.
fn load_spawner_config(path: &Path) -> Result<SpawnerConfig, EngineError> {
    if !path.exists() {
        return Ok(SpawnerConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Spawner {
        message: format!("failed to read config file: {e}"),
    })?;
    parse_spawner_config(&contents)
}

/// Extract the `spawner` section from a full config document.
fn parse_spawner_config(yaml: &str) -> Result<SpawnerConfig, EngineError> {
    let raw: serde_yml::Value = serde_yml::from_str(yaml).map_err(|e| EngineError::Spawner {
        message: format!("failed to parse config YAML: {e}"),
    })?;

    raw.get("spawner").map_or_else(
        || Ok(SpawnerConfig::default()),
        |section| {
            serde_yml::from_value(section.clone()).map_err(|e| EngineError::Spawner {
                message: format!("failed to parse spawner config: {e}"),
            })
        },
    )
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
