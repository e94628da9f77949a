//! Relation graph registry and the accessor trait the lineage search reads.
//!
//! Relations are kept out of the avatar records and stored here as an
//! id-keyed registry, so avatars never hold references to each other.
//!
//! # Perspective
//!
//! The relation map of avatar N lists, for every other avatar O, the kind O
//! holds *toward N*. After `acknowledge_child(parent, child)` the parent's
//! map reads `child -> IsChildOf` and the child's map reads
//! `parent -> IsParentOf`. Every mutator writes both perspectives so the two
//! maps never disagree.

use std::collections::BTreeMap;

use cultivation_types::{AvatarId, Relation};
use tracing::debug;

use crate::error::AvatarError;

// ---------------------------------------------------------------------------
// RelationSource
// ---------------------------------------------------------------------------

/// Read access to per-avatar relation maps.
///
/// Implementations must never fail: an unknown avatar, or one without any
/// relations, yields an empty iterator. Iteration order carries no meaning.
pub trait RelationSource {
    /// Enumerate `(other, kind)` pairs where `other` holds `kind` toward
    /// `avatar`.
    fn relations_of(&self, avatar: AvatarId) -> impl Iterator<Item = (AvatarId, Relation)> + '_;
}

// ---------------------------------------------------------------------------
// RelationGraph
// ---------------------------------------------------------------------------

/// In-memory registry of every avatar's relation map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    /// For each avatar, the relation every other avatar holds toward it.
    relations: BTreeMap<AvatarId, BTreeMap<AvatarId, Relation>>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            relations: BTreeMap::new(),
        }
    }

    /// Record that `subject` holds `relation` toward `object`.
    ///
    /// The inverse relation is recorded from `object` toward `subject`.
    /// Any earlier relation between the pair is replaced and returned.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::SelfRelation`] if `subject == object`.
    pub fn set_relation(
        &mut self,
        subject: AvatarId,
        object: AvatarId,
        relation: Relation,
    ) -> Result<Option<Relation>, AvatarError> {
        if subject == object {
            return Err(AvatarError::SelfRelation(subject));
        }

        let previous = self
            .relations
            .entry(object)
            .or_default()
            .insert(subject, relation);
        self.relations
            .entry(subject)
            .or_default()
            .insert(object, relation.inverse());

        debug!(%subject, %object, ?relation, ?previous, "relation set");
        Ok(previous)
    }

    /// Remove any relation between `a` and `b`, in both directions.
    ///
    /// Returns `true` if a relation existed.
    pub fn clear_relation(&mut self, a: AvatarId, b: AvatarId) -> bool {
        let removed_a = self
            .relations
            .get_mut(&a)
            .and_then(|map| map.remove(&b))
            .is_some();
        let removed_b = self
            .relations
            .get_mut(&b)
            .and_then(|map| map.remove(&a))
            .is_some();
        removed_a || removed_b
    }

    /// `child` becomes the child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::SelfRelation`] if both IDs are equal.
    pub fn acknowledge_child(
        &mut self,
        parent: AvatarId,
        child: AvatarId,
    ) -> Result<(), AvatarError> {
        self.set_relation(child, parent, Relation::IsChildOf)
            .map(|_| ())
    }

    /// `disciple` becomes the disciple of `master`.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::SelfRelation`] if both IDs are equal.
    pub fn accept_disciple(
        &mut self,
        master: AvatarId,
        disciple: AvatarId,
    ) -> Result<(), AvatarError> {
        self.set_relation(disciple, master, Relation::IsDiscipleOf)
            .map(|_| ())
    }

    /// The relation `subject` holds toward `object`, if any.
    pub fn relation_between(&self, subject: AvatarId, object: AvatarId) -> Option<Relation> {
        self.relations
            .get(&object)
            .and_then(|map| map.get(&subject))
            .copied()
    }

    /// Drop an avatar's relation map and every entry that mentions it.
    ///
    /// Returns the number of relations removed.
    pub fn remove_avatar(&mut self, avatar: AvatarId) -> usize {
        let Some(own) = self.relations.remove(&avatar) else {
            return 0;
        };

        for other in own.keys() {
            if let Some(map) = self.relations.get_mut(other) {
                map.remove(&avatar);
            }
        }

        debug!(%avatar, removed = own.len(), "avatar relations removed");
        own.len()
    }

    /// Number of relations held toward `avatar`.
    pub fn degree(&self, avatar: AvatarId) -> usize {
        self.relations.get(&avatar).map_or(0, BTreeMap::len)
    }
}

impl RelationSource for RelationGraph {
    fn relations_of(&self, avatar: AvatarId) -> impl Iterator<Item = (AvatarId, Relation)> + '_ {
        self.relations
            .get(&avatar)
            .into_iter()
            .flat_map(|map| map.iter().map(|(other, relation)| (*other, *relation)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledge_child_records_both_perspectives() {
        let mut graph = RelationGraph::new();
        let parent = AvatarId::new();
        let child = AvatarId::new();

        assert!(graph.acknowledge_child(parent, child).is_ok());

        assert_eq!(graph.relation_between(child, parent), Some(Relation::IsChildOf));
        assert_eq!(graph.relation_between(parent, child), Some(Relation::IsParentOf));

        let from_parent: Vec<_> = graph.relations_of(parent).collect();
        assert_eq!(from_parent, vec![(child, Relation::IsChildOf)]);
        let from_child: Vec<_> = graph.relations_of(child).collect();
        assert_eq!(from_child, vec![(parent, Relation::IsParentOf)]);
    }

    #[test]
    fn accept_disciple_records_master() {
        let mut graph = RelationGraph::new();
        let master = AvatarId::new();
        let disciple = AvatarId::new();

        assert!(graph.accept_disciple(master, disciple).is_ok());

        assert_eq!(graph.relation_between(disciple, master), Some(Relation::IsDiscipleOf));
        assert_eq!(graph.relation_between(master, disciple), Some(Relation::IsMasterOf));
    }

    #[test]
    fn self_relation_is_rejected() {
        let mut graph = RelationGraph::new();
        let a = AvatarId::new();
        let result = graph.set_relation(a, a, Relation::IsFriendOf);
        assert!(matches!(result, Err(AvatarError::SelfRelation(id)) if id == a));
        assert_eq!(graph.degree(a), 0);
    }

    #[test]
    fn set_relation_replaces_previous() {
        let mut graph = RelationGraph::new();
        let a = AvatarId::new();
        let b = AvatarId::new();

        let first = graph.set_relation(a, b, Relation::IsFriendOf);
        assert!(matches!(first, Ok(None)));
        let second = graph.set_relation(a, b, Relation::IsEnemyOf);
        assert!(matches!(second, Ok(Some(Relation::IsFriendOf))));

        assert_eq!(graph.relation_between(a, b), Some(Relation::IsEnemyOf));
        assert_eq!(graph.relation_between(b, a), Some(Relation::IsEnemyOf));
        assert_eq!(graph.degree(a), 1);
    }

    #[test]
    fn clear_relation_removes_both_sides() {
        let mut graph = RelationGraph::new();
        let parent = AvatarId::new();
        let child = AvatarId::new();
        assert!(graph.acknowledge_child(parent, child).is_ok());

        assert!(graph.clear_relation(parent, child));
        assert_eq!(graph.relation_between(child, parent), None);
        assert_eq!(graph.relation_between(parent, child), None);
        assert!(!graph.clear_relation(parent, child));
    }

    #[test]
    fn remove_avatar_drops_incoming_entries() {
        let mut graph = RelationGraph::new();
        let master = AvatarId::new();
        let first = AvatarId::new();
        let second = AvatarId::new();
        assert!(graph.accept_disciple(master, first).is_ok());
        assert!(graph.accept_disciple(master, second).is_ok());

        assert_eq!(graph.remove_avatar(master), 2);
        assert_eq!(graph.degree(first), 0);
        assert_eq!(graph.degree(second), 0);
        assert_eq!(graph.remove_avatar(master), 0);
    }

    #[test]
    fn unknown_avatar_has_no_relations() {
        let graph = RelationGraph::new();
        assert_eq!(graph.relations_of(AvatarId::new()).count(), 0);
    }
}
