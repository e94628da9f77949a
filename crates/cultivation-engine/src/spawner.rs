//! Lineage spawner for seeding the world with clans and sects.
//!
//! At simulation start the spawner founds a number of family clans and
//! sects. Each founder heads a tree of descendants: clan members are linked
//! parent to child, sect members master to disciple. Levels fall with each
//! generation so elders can impart to their juniors, and juniors settle near
//! their elders so they stay within observation range.

use std::collections::BTreeSet;

use cultivation_avatars::NewAvatar;
use cultivation_core::world::World;
use cultivation_types::{AvatarId, Gender, MonthStamp};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::EngineError;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// Configuration for the lineage spawner, read from the `spawner` key of
/// `cultivation-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnerConfig {
    /// Number of family clans to found.
    #[serde(default = "default_clans")]
    pub clans: u32,

    /// Generations per clan, founder included.
    #[serde(default = "default_generations")]
    pub family_generations: u32,

    /// Children born to each clan member of a non-final generation.
    #[serde(default = "default_branching")]
    pub children_per_parent: u32,

    /// Number of sects to found.
    #[serde(default = "default_sects")]
    pub sects: u32,

    /// Generations per sect, founder included.
    #[serde(default = "default_generations")]
    pub sect_generations: u32,

    /// Disciples accepted by each sect member of a non-final generation.
    #[serde(default = "default_branching")]
    pub disciples_per_master: u32,

    /// Cultivation level of every founder.
    #[serde(default = "default_founder_level")]
    pub founder_level: u32,

    /// Levels lost per generation below the founder.
    #[serde(default = "default_level_drop")]
    pub level_drop_per_generation: u32,

    /// Maximum extra levels randomly subtracted from each spawned avatar.
    #[serde(default = "default_level_jitter")]
    pub level_jitter: u32,

    /// Maximum distance, per axis, between an avatar and its elder.
    #[serde(default = "default_spread")]
    pub spread: i32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            clans: default_clans(),
            family_generations: default_generations(),
            children_per_parent: default_branching(),
            sects: default_sects(),
            sect_generations: default_generations(),
            disciples_per_master: default_branching(),
            founder_level: default_founder_level(),
            level_drop_per_generation: default_level_drop(),
            level_jitter: default_level_jitter(),
            spread: default_spread(),
        }
    }
}

const fn default_clans() -> u32 {
    2
}

const fn default_sects() -> u32 {
    1
}

const fn default_generations() -> u32 {
    3
}

const fn default_branching() -> u32 {
    2
}

const fn default_founder_level() -> u32 {
    95
}

const fn default_level_drop() -> u32 {
    25
}

const fn default_level_jitter() -> u32 {
    5
}

const fn default_spread() -> i32 {
    2
}

// -----------------------------------------------------------------------
// Name pools
// -----------------------------------------------------------------------

/// Clan surnames, used in order as clans are founded.
const SURNAMES: &[&str] = &[
    "Lin", "Zhao", "Han", "Su", "Mo", "Ye", "Bai", "Qin", "Xiao", "Gu",
];

/// Sect names, used in order as sects are founded.
const SECTS: &[&str] = &[
    "Azure Peak", "Crimson Lotus", "Jade Pavilion", "Thunder Gorge", "Frost Moon",
];

/// Given names shared by clans and sects.
const GIVEN_NAMES: &[&str] = &[
    "Feng", "Yun", "Xue", "Hao", "Ming", "Lan", "Jing", "Rui", "Tian", "Yu",
    "Chen", "Wei", "Shan", "Ling", "Qing", "Hui", "Zhen", "Bo", "Ning", "Yan",
];

// -----------------------------------------------------------------------
// Spawning
// -----------------------------------------------------------------------

/// Which kind of lineage a tree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lineage {
    Family,
    Sect,
}

/// The output of the lineage spawner.
#[derive(Debug, Default)]
pub struct SpawnResult {
    /// Founders of every clan and sect, clans first.
    pub founders: Vec<AvatarId>,
    /// Total avatars created, founders included.
    pub spawned: usize,
}

/// Seed `world` with the clans and sects described by `config`.
///
/// # Errors
///
/// Returns [`EngineError::Avatar`] if an avatar or relation cannot be
/// created.
pub fn spawn_lineages(
    world: &mut World,
    config: &SpawnerConfig,
    rng: &mut impl Rng,
) -> Result<SpawnResult, EngineError> {
    let mut used_names: BTreeSet<String> =
        world.avatars.iter().map(|a| a.name.clone()).collect();
    let mut result = SpawnResult::default();

    let clans = (0..config.clans).map(|i| (Lineage::Family, i));
    let sects = (0..config.sects).map(|i| (Lineage::Sect, i));
    for (lineage, index) in clans.chain(sects) {
        let spawned = spawn_tree(world, config, lineage, index, &mut used_names, rng)?;
        if let Some(&founder) = spawned.first() {
            result.founders.push(founder);
        }
        result.spawned = result.spawned.saturating_add(spawned.len());
    }

    info!(
        founders = result.founders.len(),
        avatars = result.spawned,
        "Seeded lineages"
    );
    Ok(result)
}

/// Spawn one clan or sect tree and return its avatars, founder first.
fn spawn_tree(
    world: &mut World,
    config: &SpawnerConfig,
    lineage: Lineage,
    index: u32,
    used_names: &mut BTreeSet<String>,
    rng: &mut impl Rng,
) -> Result<Vec<AvatarId>, EngineError> {
    let (generations, branching, label) = match lineage {
        Lineage::Family => (
            config.family_generations,
            config.children_per_parent,
            pick_label(SURNAMES, index),
        ),
        Lineage::Sect => (
            config.sect_generations,
            config.disciples_per_master,
            pick_label(SECTS, index),
        ),
    };
    if generations == 0 {
        return Ok(Vec::new());
    }

    let home = (
        i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(20),
        if lineage == Lineage::Family { 0 } else { 40 },
    );
    let founder = spawn_one(world, config, lineage, &label, 0, home, used_names, rng)?;
    let mut all = vec![founder];
    let mut elders = vec![founder];

    for generation in 1..generations {
        let mut juniors = Vec::new();
        for &elder in &elders {
            let near = world
                .avatars
                .get(elder)
                .map_or(home, |a| (a.pos_x, a.pos_y));
            for _ in 0..branching {
                let junior =
                    spawn_one(world, config, lineage, &label, generation, near, used_names, rng)?;
                match lineage {
                    Lineage::Family => world.relations.acknowledge_child(elder, junior)?,
                    Lineage::Sect => world.relations.accept_disciple(elder, junior)?,
                }
                juniors.push(junior);
            }
        }
        all.extend(juniors.iter().copied());
        elders = juniors;
    }

    debug!(lineage = ?lineage, %label, members = all.len(), "Spawned lineage tree");
    Ok(all)
}

#[allow(clippy::too_many_arguments)]
fn spawn_one(
    world: &mut World,
    config: &SpawnerConfig,
    lineage: Lineage,
    label: &str,
    generation: u32,
    near: (i32, i32),
    used_names: &mut BTreeSet<String>,
    rng: &mut impl Rng,
) -> Result<AvatarId, EngineError> {
    let name = unused_name(lineage, label, used_names, rng);
    used_names.insert(name.clone());

    let drop = config.level_drop_per_generation.saturating_mul(generation);
    let jitter = if generation == 0 {
        0
    } else {
        rng.random_range(0..=config.level_jitter)
    };
    let level = config
        .founder_level
        .saturating_sub(drop)
        .saturating_sub(jitter)
        .max(1);

    let spread = config.spread.max(0);
    let position = (
        near.0.saturating_add(rng.random_range(spread.saturating_neg()..=spread)),
        near.1.saturating_add(rng.random_range(spread.saturating_neg()..=spread)),
    );

    // Elders are born earlier: roughly twenty years per generation.
    let depth = config
        .family_generations
        .max(config.sect_generations)
        .saturating_sub(generation);
    let age_months = 240_u32
        .saturating_mul(depth)
        .saturating_add(rng.random_range(192..=240));
    let birth_month = MonthStamp(world.now().0.saturating_sub(age_months));

    let gender = if rng.random_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };

    let id = world.avatars.create_avatar(NewAvatar {
        name,
        gender,
        birth_month,
        position,
        level,
    })?;
    Ok(id)
}

/// The label of the `index`-th clan or sect, numbered once the pool runs out.
fn pick_label(pool: &[&str], index: u32) -> String {
    let len = u32::try_from(pool.len()).unwrap_or(u32::MAX).max(1);
    let slot = index.checked_rem(len).unwrap_or_default();
    let base = pool
        .get(usize::try_from(slot).unwrap_or_default())
        .copied()
        .unwrap_or("Nameless");
    let round = index.checked_div(len).unwrap_or_default();
    if round == 0 {
        String::from(base)
    } else {
        format!("{base} {}", round.saturating_add(1))
    }
}

/// Pick a name not yet in use for a member of `label`'s lineage.
fn unused_name(
    lineage: Lineage,
    label: &str,
    used_names: &BTreeSet<String>,
    rng: &mut impl Rng,
) -> String {
    let compose = |given: &str| match lineage {
        Lineage::Family => format!("{label} {given}"),
        Lineage::Sect => format!("{given} of {label}"),
    };

    let available: Vec<String> = GIVEN_NAMES
        .iter()
        .map(|given| compose(*given))
        .filter(|name| !used_names.contains(name))
        .collect();
    if let Some(name) = available.choose(rng) {
        return name.clone();
    }

    // Pool exhausted: number the names.
    let mut counter: u32 = 2;
    loop {
        let given = GIVEN_NAMES.choose(rng).copied().unwrap_or("Wu");
        let name = compose(&format!("{given} {counter}"));
        if !used_names.contains(&name) {
            return name;
        }
        counter = counter.saturating_add(1);
    }
}
