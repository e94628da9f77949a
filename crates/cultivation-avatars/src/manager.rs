//! Avatar creation and lookup.
//!
//! The [`AvatarManager`] owns every living [`Avatar`] record, enforces name
//! uniqueness, and resolves the loose target references that actions accept
//! (an ID or a display name).

use std::collections::{BTreeMap, btree_map};
use std::fmt;
use std::ops::Deref;

use cultivation_types::{Avatar, AvatarId, CultivationProgress, Gender, MonthStamp};

use crate::error::AvatarError;

/// Parameters for creating a new avatar.
#[derive(Debug, Clone)]
pub struct NewAvatar {
    /// Display name (must be unique).
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Birth month.
    pub birth_month: MonthStamp,
    /// Starting position `(x, y)`.
    pub position: (i32, i32),
    /// Starting cultivation level.
    pub level: u32,
}

/// A reference to an avatar as supplied by a caller: either its ID or its
/// display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarRef {
    /// Reference by identity.
    Id(AvatarId),
    /// Reference by display name.
    Name(String),
}

impl fmt::Display for AvatarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<AvatarId> for AvatarRef {
    fn from(id: AvatarId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for AvatarRef {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

/// Registry of living avatars.
#[derive(Debug, Clone, Default)]
pub struct AvatarManager {
    /// Avatar records keyed by ID.
    avatars: BTreeMap<AvatarId, Avatar>,
    /// Name index for lookups by display name.
    names: BTreeMap<String, AvatarId>,
}

impl AvatarManager {
    /// Create an empty manager.
    pub const fn new() -> Self {
        Self {
            avatars: BTreeMap::new(),
            names: BTreeMap::new(),
        }
    }

    /// Create and register a new avatar, returning its ID.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::DuplicateName`] if the name is already taken.
    pub fn create_avatar(&mut self, params: NewAvatar) -> Result<AvatarId, AvatarError> {
        let id = AvatarId::new();
        let (pos_x, pos_y) = params.position;
        self.insert(Avatar {
            id,
            name: params.name,
            gender: params.gender,
            birth_month: params.birth_month,
            pos_x,
            pos_y,
            cultivation: CultivationProgress::at_level(params.level),
        })?;
        Ok(id)
    }

    /// Register an existing avatar record.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::DuplicateName`] if the name is already taken.
    pub fn insert(&mut self, avatar: Avatar) -> Result<(), AvatarError> {
        if self.names.contains_key(&avatar.name) {
            return Err(AvatarError::DuplicateName(avatar.name));
        }
        self.names.insert(avatar.name.clone(), avatar.id);
        self.avatars.insert(avatar.id, avatar);
        Ok(())
    }

    /// Remove an avatar, releasing its name.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::AvatarNotFound`] if no such avatar exists.
    pub fn remove(&mut self, id: AvatarId) -> Result<Avatar, AvatarError> {
        let avatar = self
            .avatars
            .remove(&id)
            .ok_or(AvatarError::AvatarNotFound(id))?;
        self.names.remove(&avatar.name);
        Ok(avatar)
    }

    /// Look up an avatar by ID.
    pub fn get(&self, id: AvatarId) -> Option<&Avatar> {
        self.avatars.get(&id)
    }

    /// Look up an avatar by ID for mutation.
    ///
    /// The handle exposes cultivation and position only; names change
    /// through [`rename`](Self::rename) so the name index stays in step.
    pub fn get_mut(&mut self, id: AvatarId) -> Option<AvatarMut<'_>> {
        self.avatars.get_mut(&id).map(|avatar| AvatarMut { avatar })
    }

    /// Give an avatar a new display name.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::AvatarNotFound`] if no such avatar exists, or
    /// [`AvatarError::DuplicateName`] if another avatar holds the name.
    pub fn rename(&mut self, id: AvatarId, name: String) -> Result<(), AvatarError> {
        if self.names.get(&name).is_some_and(|holder| *holder != id) {
            return Err(AvatarError::DuplicateName(name));
        }
        let avatar = self
            .avatars
            .get_mut(&id)
            .ok_or(AvatarError::AvatarNotFound(id))?;
        self.names.remove(&avatar.name);
        self.names.insert(name.clone(), id);
        avatar.name = name;
        Ok(())
    }

    /// Look up an avatar by display name.
    pub fn get_by_name(&self, name: &str) -> Option<&Avatar> {
        self.names.get(name).and_then(|id| self.avatars.get(id))
    }

    /// Resolve an [`AvatarRef`] to a registered avatar.
    ///
    /// Names are matched after trimming surrounding whitespace.
    pub fn resolve(&self, target: &AvatarRef) -> Option<&Avatar> {
        match target {
            AvatarRef::Id(id) => self.get(*id),
            AvatarRef::Name(name) => self.get_by_name(name.trim()),
        }
    }

    /// Iterate all avatars in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Avatar> {
        self.avatars.values()
    }

    /// Number of registered avatars.
    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    /// Whether no avatars are registered.
    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }
}

/// Mutable access to one avatar's cultivation and position.
///
/// Dereferences to [`Avatar`] for reading.
#[derive(Debug)]
pub struct AvatarMut<'a> {
    avatar: &'a mut Avatar,
}

impl AvatarMut<'_> {
    /// The avatar's cultivation progress.
    pub const fn cultivation_mut(&mut self) -> &mut CultivationProgress {
        &mut self.avatar.cultivation
    }

    /// Move the avatar to `(x, y)`.
    pub const fn set_position(&mut self, x: i32, y: i32) {
        self.avatar.pos_x = x;
        self.avatar.pos_y = y;
    }
}

impl Deref for AvatarMut<'_> {
    type Target = Avatar;

    fn deref(&self) -> &Avatar {
        self.avatar
    }
}

impl<'a> IntoIterator for &'a AvatarManager {
    type Item = &'a Avatar;
    type IntoIter = btree_map::Values<'a, AvatarId, Avatar>;

    fn into_iter(self) -> Self::IntoIter {
        self.avatars.values()
    }
}

#[cfg(test)]
mod tests {
    use cultivation_types::Month;

    use super::*;

    fn params(name: &str, level: u32) -> NewAvatar {
        NewAvatar {
            name: String::from(name),
            gender: Gender::Female,
            birth_month: MonthStamp::from_year_month(1900, Month::January).unwrap_or_default(),
            position: (0, 0),
            level,
        }
    }

    #[test]
    fn create_and_lookup() {
        let mut manager = AvatarManager::new();
        let id = manager.create_avatar(params("Lin", 40));
        assert!(id.is_ok());
        let id = id.unwrap_or_default();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(id).map(|a| a.cultivation.level), Some(40));
        assert_eq!(manager.get_by_name("Lin").map(|a| a.id), Some(id));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut manager = AvatarManager::new();
        assert!(manager.create_avatar(params("Lin", 1)).is_ok());
        let result = manager.create_avatar(params("Lin", 2));
        assert!(matches!(result, Err(AvatarError::DuplicateName(ref n)) if n == "Lin"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn remove_releases_name() {
        let mut manager = AvatarManager::new();
        let id = manager.create_avatar(params("Lin", 1)).unwrap_or_default();
        assert!(manager.remove(id).is_ok());
        assert!(manager.is_empty());
        assert!(manager.create_avatar(params("Lin", 1)).is_ok());
        assert!(matches!(manager.remove(id), Err(AvatarError::AvatarNotFound(_))));
    }

    #[test]
    fn resolve_by_id_and_trimmed_name() {
        let mut manager = AvatarManager::new();
        let id = manager.create_avatar(params("Lin", 1)).unwrap_or_default();

        assert_eq!(manager.resolve(&AvatarRef::Id(id)).map(|a| a.id), Some(id));
        assert_eq!(manager.resolve(&AvatarRef::from(" Lin ")).map(|a| a.id), Some(id));
        assert!(manager.resolve(&AvatarRef::from("Nobody")).is_none());
    }

    #[test]
    fn handle_mutates_without_breaking_name_lookup() {
        let mut manager = AvatarManager::new();
        let id = manager.create_avatar(params("Lin", 1)).unwrap_or_default();

        if let Some(mut avatar) = manager.get_mut(id) {
            avatar.cultivation_mut().level = 25;
            avatar.set_position(4, -2);
            assert_eq!(avatar.name, "Lin");
        }

        let found = manager.resolve(&AvatarRef::from("Lin"));
        assert_eq!(found.map(|a| (a.cultivation.level, a.pos_x, a.pos_y)), Some((25, 4, -2)));
    }

    #[test]
    fn rename_moves_name_index() {
        let mut manager = AvatarManager::new();
        let lin = manager.create_avatar(params("Lin", 1)).unwrap_or_default();
        assert!(manager.create_avatar(params("Zhao", 1)).is_ok());

        assert!(manager.rename(lin, String::from("Lin Feng")).is_ok());
        assert!(manager.get_by_name("Lin").is_none());
        assert_eq!(manager.get_by_name("Lin Feng").map(|a| a.id), Some(lin));
        assert!(manager.create_avatar(params("Lin", 1)).is_ok());

        let taken = manager.rename(lin, String::from("Zhao"));
        assert!(matches!(taken, Err(AvatarError::DuplicateName(ref n)) if n == "Zhao"));
        assert_eq!(manager.get(lin).map(|a| a.name.as_str()), Some("Lin Feng"));

        assert!(manager.rename(lin, String::from("Lin Feng")).is_ok());
        assert!(matches!(
            manager.rename(AvatarId::new(), String::from("Ghost")),
            Err(AvatarError::AvatarNotFound(_))
        ));
    }
}
