//! Core entity structs: the month clock stamp, avatars, cultivation progress,
//! and narrated events.
//!
//! Relations between avatars are deliberately absent from [`Avatar`]; they are
//! held by the relation graph registry in `cultivation-avatars` and addressed
//! by [`AvatarId`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Gender, Month, Realm};
use crate::ids::{AvatarId, EventId};

// ---------------------------------------------------------------------------
// MonthStamp
// ---------------------------------------------------------------------------

/// A point on the simulation calendar, counted in months since year 0.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct MonthStamp(pub u32);

impl MonthStamp {
    /// Build a stamp from a year and month.
    ///
    /// Returns `None` if the stamp would overflow.
    pub fn from_year_month(year: u32, month: Month) -> Option<Self> {
        year.checked_mul(12)?.checked_add(month.index()).map(Self)
    }

    /// The calendar year of this stamp.
    pub const fn year(self) -> u32 {
        self.0 / 12
    }

    /// The calendar month of this stamp.
    pub const fn month(self) -> Month {
        Month::from_index(self.0 % 12)
    }

    /// The stamp `months` later, or `None` on overflow.
    pub fn checked_add_months(self, months: u32) -> Option<Self> {
        self.0.checked_add(months).map(Self)
    }

    /// Whole months elapsed since `earlier`, saturating at zero.
    pub const fn months_since(self, earlier: Self) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl core::fmt::Display for MonthStamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "year {} {:?}", self.year(), self.month())
    }
}

// ---------------------------------------------------------------------------
// CultivationProgress
// ---------------------------------------------------------------------------

/// An avatar's cultivation level and accumulated experience toward the next
/// level.
///
/// The level-up rules live in `cultivation-avatars::cultivation`; this struct
/// is plain data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CultivationProgress {
    /// Current cultivation level.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub exp: u64,
}

impl CultivationProgress {
    /// Create a progress record at the given level with zero experience.
    pub const fn at_level(level: u32) -> Self {
        Self { level, exp: 0 }
    }

    /// The realm this progress falls into.
    pub const fn realm(&self) -> Realm {
        Realm::from_level(self.level)
    }
}

// ---------------------------------------------------------------------------
// Avatar
// ---------------------------------------------------------------------------

/// A character in the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Avatar {
    /// Stable unique identity.
    pub id: AvatarId,
    /// Display name, unique among living avatars.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// The month the avatar was born.
    pub birth_month: MonthStamp,
    /// Map column.
    pub pos_x: i32,
    /// Map row.
    pub pos_y: i32,
    /// Cultivation level and experience.
    pub cultivation: CultivationProgress,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A narrated event produced by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// The simulation month in which the event happened.
    pub month_stamp: MonthStamp,
    /// Human-readable narration.
    pub content: String,
    /// Avatars involved, initiator first.
    pub related_avatars: Vec<AvatarId>,
    /// Real-world timestamp when the event was created.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with a fresh ID and the current time.
    pub fn new(month_stamp: MonthStamp, content: String, related_avatars: Vec<AvatarId>) -> Self {
        Self {
            id: EventId::new(),
            month_stamp,
            content,
            related_avatars,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_stamp_from_year_month() {
        let stamp = MonthStamp::from_year_month(1900, Month::March);
        assert_eq!(stamp, Some(MonthStamp(1900 * 12 + 2)));
        let stamp = stamp.unwrap_or_default();
        assert_eq!(stamp.year(), 1900);
        assert_eq!(stamp.month(), Month::March);
    }

    #[test]
    fn month_stamp_overflow_is_none() {
        assert_eq!(MonthStamp::from_year_month(u32::MAX, Month::January), None);
        assert_eq!(MonthStamp(u32::MAX).checked_add_months(1), None);
    }

    #[test]
    fn months_since_saturates() {
        let early = MonthStamp(10);
        let late = MonthStamp(16);
        assert_eq!(late.months_since(early), 6);
        assert_eq!(early.months_since(late), 0);
    }

    #[test]
    fn progress_realm_follows_level() {
        assert_eq!(CultivationProgress::at_level(45).realm(), Realm::FoundationEstablishment);
    }

    #[test]
    fn event_serializes_related_avatars() {
        let a = AvatarId::new();
        let b = AvatarId::new();
        let event = Event::new(MonthStamp(12), String::from("x"), vec![a, b]);
        let json = serde_json::to_value(&event).unwrap_or_default();
        let related = json
            .get("related_avatars")
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len);
        assert_eq!(related, 2);
    }
}
