//! Impart: a senior passes cultivation insight to a downstream junior.
//!
//! The giver may only impart to an avatar in their own lineage (a child,
//! grandchild, disciple, or granddisciple by default) who is within
//! observation range and at least 20 levels below them. When the receiver
//! accepts, they gain a fixed amount of cultivation experience.

use cultivation_types::{Avatar, Event, Feedback, RejectionReason};
use tracing::{debug, info, warn};

use crate::actions::{ActionContext, MutualAction};
use crate::config::{CultivationConfig, ImpartConfig};
use crate::cultivation;
use crate::error::AvatarError;
use crate::lineage::is_allowed_downward_target;
use crate::manager::{AvatarManager, AvatarRef};

/// The impart mutual action.
#[derive(Debug, Clone)]
pub struct Impart {
    config: ImpartConfig,
    cultivation: CultivationConfig,
    success: bool,
    exp_gain: u64,
}

impl Impart {
    /// Create an impart action with the given tuning.
    pub const fn new(config: ImpartConfig, cultivation: CultivationConfig) -> Self {
        Self {
            config,
            cultivation,
            success: false,
            exp_gain: 0,
        }
    }

    /// Whether the last settled feedback was an acceptance.
    pub const fn succeeded(&self) -> bool {
        self.success
    }

    /// Experience granted by the last successful impart.
    pub const fn exp_gain(&self) -> u64 {
        self.exp_gain
    }
}

impl MutualAction for Impart {
    const NAME: &'static str = "Impart";

    fn cooldown_months(&self) -> u32 {
        self.config.cooldown_months
    }

    fn can_start(
        &self,
        ctx: &ActionContext<'_>,
        initiator: &Avatar,
        target: &AvatarRef,
    ) -> Result<(), RejectionReason> {
        let Some(target) = ctx.avatars.resolve(target) else {
            return Err(RejectionReason::TargetNotFound {
                target: target.to_string(),
            });
        };

        if !ctx.observation.is_within_observation(initiator, target) {
            return Err(RejectionReason::OutOfObservationRange);
        }

        if !is_allowed_downward_target(ctx.relations, initiator.id, target.id, &self.config) {
            return Err(RejectionReason::NotDownstreamJunior);
        }

        let level_diff = i64::from(initiator.cultivation.level)
            .saturating_sub(i64::from(target.cultivation.level));
        if level_diff < i64::from(self.config.min_level_gap) {
            return Err(RejectionReason::LevelGapInsufficient {
                required: self.config.min_level_gap,
                current: level_diff,
            });
        }

        Ok(())
    }

    fn start(&mut self, ctx: &ActionContext<'_>, initiator: &Avatar, target: &AvatarRef) -> Event {
        let resolved = ctx.avatars.resolve(target);
        let target_name = resolved.map_or_else(|| target.to_string(), |a| a.name.clone());

        let mut related = vec![initiator.id];
        if let Some(avatar) = resolved {
            related.push(avatar.id);
        }

        self.success = false;
        self.exp_gain = 0;

        Event::new(
            ctx.now,
            format!(
                "{} imparts cultivation knowledge to {target_name}",
                initiator.name
            ),
            related,
        )
    }

    fn settle_feedback(
        &mut self,
        avatars: &mut AvatarManager,
        target: &AvatarRef,
        feedback: Feedback,
    ) -> Result<(), AvatarError> {
        if feedback != Feedback::Accept {
            self.success = false;
            debug!(%target, "impart rejected by receiver");
            return Ok(());
        }

        let Some(target_id) = avatars.resolve(target).map(|a| a.id) else {
            warn!(%target, "impart receiver vanished before settlement");
            self.success = false;
            return Ok(());
        };
        let mut receiver = avatars
            .get_mut(target_id)
            .ok_or(AvatarError::AvatarNotFound(target_id))?;

        let levels = cultivation::add_exp(
            receiver.cultivation_mut(),
            self.config.exp_gain,
            &self.cultivation,
        )?;
        self.exp_gain = self.config.exp_gain;
        self.success = true;

        info!(
            receiver = %receiver.name,
            exp = self.exp_gain,
            levels_gained = levels,
            level = receiver.cultivation.level,
            "impart accepted"
        );
        Ok(())
    }

    fn finish(
        &mut self,
        ctx: &ActionContext<'_>,
        initiator: &Avatar,
        target: &AvatarRef,
    ) -> Vec<Event> {
        let Some(target) = ctx.avatars.resolve(target) else {
            return Vec::new();
        };
        if !self.success {
            return Vec::new();
        }

        vec![Event::new(
            ctx.now,
            format!(
                "{} gained cultivation experience +{} points",
                target.name, self.exp_gain
            ),
            vec![initiator.id, target.id],
        )]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
