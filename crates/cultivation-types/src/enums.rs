//! Enumeration types for the cultivation simulation.
//!
//! Relation kinds, genders, cultivation realms, calendar months, mutual-action
//! feedback, and the rejection reasons surfaced by action gates.

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Relation
// ---------------------------------------------------------------------------

/// The kind of a directed relation one avatar holds toward another.
///
/// "A `IsChildOf` B" reads as "A is the child of B", so the junior side
/// holds the descent kinds ([`IsChildOf`], [`IsDiscipleOf`]) and the senior
/// side holds their inverses.
///
/// [`IsChildOf`]: Relation::IsChildOf
/// [`IsDiscipleOf`]: Relation::IsDiscipleOf
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Relation {
    /// Family descent: the holder is a child of the other avatar.
    IsChildOf,
    /// The holder is a parent of the other avatar.
    IsParentOf,
    /// Sect descent: the holder is a disciple of the other avatar.
    IsDiscipleOf,
    /// The holder is the master of the other avatar.
    IsMasterOf,
    /// Siblings sharing a parent.
    IsSiblingOf,
    /// Married partners.
    IsSpouseOf,
    /// Friends.
    IsFriendOf,
    /// Sworn enemies.
    IsEnemyOf,
    /// Lovers (not married).
    IsLoverOf,
    /// Sworn siblings (oath brothers and sisters).
    IsSwornSiblingOf,
}

impl Relation {
    /// The relation the other avatar holds back toward the holder.
    ///
    /// Descent kinds map to their senior counterparts and back; every other
    /// kind is symmetric.
    pub const fn inverse(self) -> Self {
        match self {
            Self::IsChildOf => Self::IsParentOf,
            Self::IsParentOf => Self::IsChildOf,
            Self::IsDiscipleOf => Self::IsMasterOf,
            Self::IsMasterOf => Self::IsDiscipleOf,
            Self::IsSiblingOf => Self::IsSiblingOf,
            Self::IsSpouseOf => Self::IsSpouseOf,
            Self::IsFriendOf => Self::IsFriendOf,
            Self::IsEnemyOf => Self::IsEnemyOf,
            Self::IsLoverOf => Self::IsLoverOf,
            Self::IsSwornSiblingOf => Self::IsSwornSiblingOf,
        }
    }

    /// Whether this kind advances the family-descent axis.
    pub const fn is_family_descent(self) -> bool {
        matches!(self, Self::IsChildOf)
    }

    /// Whether this kind advances the sect-discipleship axis.
    pub const fn is_sect_descent(self) -> bool {
        matches!(self, Self::IsDiscipleOf)
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender of an avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

// ---------------------------------------------------------------------------
// Realm
// ---------------------------------------------------------------------------

/// Number of cultivation levels spanned by one realm.
pub const LEVELS_PER_REALM: u32 = 30;

/// A major cultivation realm, derived from an avatar's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Realm {
    /// Levels 1--30.
    QiRefinement,
    /// Levels 31--60.
    FoundationEstablishment,
    /// Levels 61--90.
    CoreFormation,
    /// Levels 91 and above.
    NascentSoul,
}

impl Realm {
    /// Derive the realm for a cultivation level.
    pub const fn from_level(level: u32) -> Self {
        match level {
            0..=30 => Self::QiRefinement,
            31..=60 => Self::FoundationEstablishment,
            61..=90 => Self::CoreFormation,
            _ => Self::NascentSoul,
        }
    }

    /// Zero-based rank of the realm (Qi Refinement is 0).
    pub const fn rank(self) -> u32 {
        match self {
            Self::QiRefinement => 0,
            Self::FoundationEstablishment => 1,
            Self::CoreFormation => 2,
            Self::NascentSoul => 3,
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::QiRefinement => "Qi Refinement",
            Self::FoundationEstablishment => "Foundation Establishment",
            Self::CoreFormation => "Core Formation",
            Self::NascentSoul => "Nascent Soul",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Month {
    /// First month.
    January,
    /// Second month.
    February,
    /// Third month.
    March,
    /// Fourth month.
    April,
    /// Fifth month.
    May,
    /// Sixth month.
    June,
    /// Seventh month.
    July,
    /// Eighth month.
    August,
    /// Ninth month.
    September,
    /// Tenth month.
    October,
    /// Eleventh month.
    November,
    /// Twelfth month.
    December,
}

impl Month {
    /// Zero-based index of the month within the year.
    pub const fn index(self) -> u32 {
        match self {
            Self::January => 0,
            Self::February => 1,
            Self::March => 2,
            Self::April => 3,
            Self::May => 4,
            Self::June => 5,
            Self::July => 6,
            Self::August => 7,
            Self::September => 8,
            Self::October => 9,
            Self::November => 10,
            Self::December => 11,
        }
    }

    /// Month for a zero-based index, wrapping modulo 12.
    pub const fn from_index(index: u32) -> Self {
        match index % 12 {
            0 => Self::January,
            1 => Self::February,
            2 => Self::March,
            3 => Self::April,
            4 => Self::May,
            5 => Self::June,
            6 => Self::July,
            7 => Self::August,
            8 => Self::September,
            9 => Self::October,
            10 => Self::November,
            _ => Self::December,
        }
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// The target's answer to a mutual action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Feedback {
    /// The target accepts the action.
    Accept,
    /// The target declines the action.
    Reject,
}

impl Feedback {
    /// Parse a feedback name, tolerating surrounding whitespace.
    ///
    /// Anything other than `Accept` is treated as a rejection.
    pub fn from_name(name: &str) -> Self {
        if name.trim() == "Accept" {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}

// ---------------------------------------------------------------------------
// RejectionReason
// ---------------------------------------------------------------------------

/// Why a mutual action was not allowed to start.
///
/// Rejection is a normal outcome rather than a fault; the [`Display`]
/// impl renders the message shown to the player.
///
/// [`Display`]: core::fmt::Display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The named target does not resolve to a living avatar.
    TargetNotFound {
        /// The raw target reference supplied by the caller.
        target: String,
    },
    /// The target is outside the initiator's observation range.
    OutOfObservationRange,
    /// The target is not a downstream junior of the initiator.
    NotDownstreamJunior,
    /// The initiator's level does not exceed the target's by enough.
    LevelGapInsufficient {
        /// Minimum level gap the action requires.
        required: u32,
        /// Actual gap (initiator level minus target level, may be negative).
        current: i64,
    },
    /// The initiator used this action too recently.
    OnCooldown {
        /// Months left until the action is available again.
        remaining_months: u32,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound { target } => write!(f, "Target avatar not found: {target}"),
            Self::OutOfObservationRange => f.write_str("Target not within interaction range"),
            Self::NotDownstreamJunior => f.write_str("Target is not your downstream junior"),
            Self::LevelGapInsufficient { required, current } => write!(
                f,
                "Level difference insufficient, need {required} levels (current gap: {current} levels)"
            ),
            Self::OnCooldown { remaining_months } => {
                write!(f, "Action on cooldown, {remaining_months} months remaining")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_involution() {
        let all = [
            Relation::IsChildOf,
            Relation::IsParentOf,
            Relation::IsDiscipleOf,
            Relation::IsMasterOf,
            Relation::IsSiblingOf,
            Relation::IsSpouseOf,
            Relation::IsFriendOf,
            Relation::IsEnemyOf,
            Relation::IsLoverOf,
            Relation::IsSwornSiblingOf,
        ];
        for relation in all {
            assert_eq!(relation.inverse().inverse(), relation);
        }
        assert_eq!(Relation::IsChildOf.inverse(), Relation::IsParentOf);
        assert_eq!(Relation::IsDiscipleOf.inverse(), Relation::IsMasterOf);
    }

    #[test]
    fn descent_axes_are_disjoint() {
        assert!(Relation::IsChildOf.is_family_descent());
        assert!(!Relation::IsChildOf.is_sect_descent());
        assert!(Relation::IsDiscipleOf.is_sect_descent());
        assert!(!Relation::IsDiscipleOf.is_family_descent());
        assert!(!Relation::IsParentOf.is_family_descent());
        assert!(!Relation::IsMasterOf.is_sect_descent());
    }

    #[test]
    fn realm_boundaries() {
        assert_eq!(Realm::from_level(1), Realm::QiRefinement);
        assert_eq!(Realm::from_level(30), Realm::QiRefinement);
        assert_eq!(Realm::from_level(31), Realm::FoundationEstablishment);
        assert_eq!(Realm::from_level(90), Realm::CoreFormation);
        assert_eq!(Realm::from_level(91), Realm::NascentSoul);
        assert_eq!(Realm::from_level(120).rank(), 3);
    }

    #[test]
    fn month_index_wraps() {
        assert_eq!(Month::from_index(0), Month::January);
        assert_eq!(Month::from_index(11), Month::December);
        assert_eq!(Month::from_index(12), Month::January);
        assert_eq!(Month::July.index(), 6);
    }

    #[test]
    fn feedback_parsing_trims() {
        assert_eq!(Feedback::from_name(" Accept\n"), Feedback::Accept);
        assert_eq!(Feedback::from_name("Reject"), Feedback::Reject);
        assert_eq!(Feedback::from_name("accept"), Feedback::Reject);
    }

    #[test]
    fn level_gap_message_reports_current_gap() {
        let reason = RejectionReason::LevelGapInsufficient {
            required: 20,
            current: 15,
        };
        assert_eq!(
            reason.to_string(),
            "Level difference insufficient, need 20 levels (current gap: 15 levels)"
        );
    }

    #[test]
    fn rejection_serializes_with_tag() {
        let json = serde_json::to_string(&RejectionReason::OnCooldown {
            remaining_months: 3,
        })
        .unwrap_or_default();
        assert!(json.contains("\"reason\":\"on_cooldown\""));
        assert!(json.contains("\"remaining_months\":3"));
    }
}
