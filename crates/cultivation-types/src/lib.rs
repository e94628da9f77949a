//! Shared type definitions for the cultivation life simulation.
//!
//! This crate holds the plain data used across the workspace. Types flow
//! downstream to `TypeScript` via `ts-rs` for any front end that renders
//! avatars and events.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for avatar and event identifiers
//! - [`enums`] -- Relation kinds, realms, months, feedback, rejection reasons
//! - [`structs`] -- Month stamps, avatars, cultivation progress, events

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Feedback, Gender, LEVELS_PER_REALM, Month, Realm, RejectionReason, Relation};
pub use ids::{AvatarId, EventId};
pub use structs::{Avatar, CultivationProgress, Event, MonthStamp};

#[cfg(test)]
mod tests {
    //! Binding generation for the exported types.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::AvatarId::export_all();
        let _ = crate::ids::EventId::export_all();
        let _ = crate::enums::Relation::export_all();
        let _ = crate::enums::Realm::export_all();
        let _ = crate::enums::RejectionReason::export_all();
        let _ = crate::structs::Avatar::export_all();
        let _ = crate::structs::Event::export_all();
    }
}
