//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Avatars and events carry strongly-typed IDs so that an avatar ID can never
//! be passed where an event ID is expected. All IDs use UUID v7
//! (time-ordered), which keeps `BTreeMap` iteration roughly in creation order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an avatar (a character in the simulation).
    AvatarId
}

define_id! {
    /// Unique identifier for a narrated event.
    EventId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = AvatarId::new();
        let b = AvatarId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = AvatarId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn uuid_round_trip() {
        let raw = Uuid::now_v7();
        let id = EventId::from(raw);
        let back: Uuid = id.into();
        assert_eq!(raw, back);
    }
}
