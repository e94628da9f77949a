//! Cultivation level-up rules.
//!
//! Advancing from level N to N+1 costs `N * exp_per_level` experience.
//! The last level of each realm (30, 60, 90) is a bottleneck: experience
//! keeps accumulating there but no level is gained until the avatar
//! performs a [`break_through`]. Levels never exceed `max_level`.

use cultivation_types::{CultivationProgress, LEVELS_PER_REALM};
use tracing::debug;

use crate::config::CultivationConfig;
use crate::error::AvatarError;

/// Experience required to advance from `level` to the next level.
///
/// Level 0 is priced like level 1. Returns `None` on overflow.
pub fn exp_to_next_level(level: u32, config: &CultivationConfig) -> Option<u64> {
    u64::from(level.max(1)).checked_mul(config.exp_per_level)
}

/// Whether the avatar sits at a realm boundary and needs a breakthrough.
pub const fn is_at_bottleneck(progress: &CultivationProgress, config: &CultivationConfig) -> bool {
    progress.level > 0
        && progress.level % LEVELS_PER_REALM == 0
        && progress.level < config.max_level
}

/// Add experience and apply any level-ups it pays for.
///
/// Leveling stops at a bottleneck or at `max_level`; leftover experience
/// stays in `progress.exp`. Returns the number of levels gained.
///
/// # Errors
///
/// Returns [`AvatarError::ArithmeticOverflow`] if the experience total
/// overflows.
pub fn add_exp(
    progress: &mut CultivationProgress,
    amount: u64,
    config: &CultivationConfig,
) -> Result<u32, AvatarError> {
    let mut next = *progress;
    next.exp = next
        .exp
        .checked_add(amount)
        .ok_or_else(|| AvatarError::ArithmeticOverflow {
            context: String::from("cultivation exp addition overflow"),
        })?;
    let gained = apply_level_ups(&mut next, config)?;

    *progress = next;
    if gained > 0 {
        debug!(level = progress.level, gained, "cultivation level up");
    }
    Ok(gained)
}

/// Spend banked experience on level-ups until a bottleneck, `max_level`, or
/// an unaffordable level.
fn apply_level_ups(
    progress: &mut CultivationProgress,
    config: &CultivationConfig,
) -> Result<u32, AvatarError> {
    let mut gained: u32 = 0;
    while progress.level < config.max_level && !is_at_bottleneck(progress, config) {
        let needed = exp_to_next_level(progress.level, config).ok_or_else(|| {
            AvatarError::ArithmeticOverflow {
                context: String::from("exp requirement overflow"),
            }
        })?;
        let Some(remaining) = progress.exp.checked_sub(needed) else {
            break;
        };
        progress.exp = remaining;
        progress.level = progress.level.saturating_add(1);
        gained = gained.saturating_add(1);
    }
    Ok(gained)
}

/// Attempt to break through a realm bottleneck.
///
/// Consumes the normal level cost. Returns `Ok(false)` if the avatar does
/// not yet have enough experience; on success any leftover experience is
/// applied to further level-ups.
///
/// # Errors
///
/// Returns [`AvatarError::NotAtBottleneck`] if the avatar is not at a realm
/// boundary, or [`AvatarError::ArithmeticOverflow`] on overflow.
pub fn break_through(
    progress: &mut CultivationProgress,
    config: &CultivationConfig,
) -> Result<bool, AvatarError> {
    if !is_at_bottleneck(progress, config) {
        return Err(AvatarError::NotAtBottleneck {
            level: progress.level,
        });
    }

    let needed = exp_to_next_level(progress.level, config).ok_or_else(|| {
        AvatarError::ArithmeticOverflow {
            context: String::from("exp requirement overflow"),
        }
    })?;
    let Some(remaining) = progress.exp.checked_sub(needed) else {
        return Ok(false);
    };

    let mut next = CultivationProgress {
        level: progress.level.saturating_add(1),
        exp: remaining,
    };
    apply_level_ups(&mut next, config)?;

    *progress = next;
    debug!(level = progress.level, realm = %progress.realm(), "breakthrough");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use cultivation_types::Realm;

    use super::*;

    #[test]
    fn exp_cost_scales_with_level() {
        let cfg = CultivationConfig::default();
        assert_eq!(exp_to_next_level(0, &cfg), Some(100));
        assert_eq!(exp_to_next_level(1, &cfg), Some(100));
        assert_eq!(exp_to_next_level(10, &cfg), Some(1000));
    }

    #[test]
    fn add_exp_levels_up_and_keeps_remainder() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress::at_level(10);
        // 1000 for 10->11, 1100 for 11->12; 2000 pays the first only.
        let gained = add_exp(&mut progress, 2000, &cfg);
        assert!(matches!(gained, Ok(1)));
        assert_eq!(progress.level, 11);
        assert_eq!(progress.exp, 1000);
    }

    #[test]
    fn add_exp_stops_at_bottleneck() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress::at_level(29);
        let gained = add_exp(&mut progress, 100_000, &cfg);
        assert!(matches!(gained, Ok(1)));
        assert_eq!(progress.level, 30);
        assert!(is_at_bottleneck(&progress, &cfg));
        // 100_000 - 2_900 stays banked.
        assert_eq!(progress.exp, 97_100);
    }

    #[test]
    fn break_through_advances_realm() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress {
            level: 30,
            exp: 3_000,
        };
        let result = break_through(&mut progress, &cfg);
        assert!(matches!(result, Ok(true)));
        assert_eq!(progress.level, 31);
        assert_eq!(progress.realm(), Realm::FoundationEstablishment);
        assert_eq!(progress.exp, 0);
    }

    #[test]
    fn break_through_without_exp_fails_softly() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress { level: 60, exp: 10 };
        assert!(matches!(break_through(&mut progress, &cfg), Ok(false)));
        assert_eq!(progress.level, 60);
        assert_eq!(progress.exp, 10);
    }

    #[test]
    fn break_through_off_bottleneck_is_error() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress::at_level(12);
        let result = break_through(&mut progress, &cfg);
        assert!(matches!(result, Err(AvatarError::NotAtBottleneck { level: 12 })));
    }

    #[test]
    fn max_level_caps_growth() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress::at_level(120);
        assert!(!is_at_bottleneck(&progress, &cfg));
        let gained = add_exp(&mut progress, 1_000_000, &cfg);
        assert!(matches!(gained, Ok(0)));
        assert_eq!(progress.level, 120);
    }

    #[test]
    fn exp_overflow_is_reported() {
        let cfg = CultivationConfig::default();
        let mut progress = CultivationProgress {
            level: 30,
            exp: u64::MAX,
        };
        let result = add_exp(&mut progress, 1, &cfg);
        assert!(matches!(result, Err(AvatarError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn failed_level_up_leaves_progress_untouched() {
        // Level 1 costs half the range; pricing level 2 overflows.
        let cfg = CultivationConfig {
            exp_per_level: u64::MAX / 2 + 1,
            max_level: 120,
        };
        let mut progress = CultivationProgress::at_level(1);
        let result = add_exp(&mut progress, u64::MAX, &cfg);
        assert!(matches!(result, Err(AvatarError::ArithmeticOverflow { .. })));
        assert_eq!(progress, CultivationProgress::at_level(1));
    }

    #[test]
    fn failed_breakthrough_leaves_progress_untouched() {
        // Breaking through at 30 is affordable; pricing level 31 overflows.
        let cfg = CultivationConfig {
            exp_per_level: u64::MAX / 31 + 1,
            max_level: 120,
        };
        let before = CultivationProgress {
            level: 30,
            exp: u64::MAX,
        };
        let mut progress = before;
        let result = break_through(&mut progress, &cfg);
        assert!(matches!(result, Err(AvatarError::ArithmeticOverflow { .. })));
        assert_eq!(progress, before);
    }
}
