//! Lineage eligibility: is a target a downstream junior of a source?
//!
//! The search is a breadth-first walk over the [`RelationSource`] starting
//! at the source avatar. Every traversal state carries two independent depth
//! counters, one for family descent (`IsChildOf`) and one for sect
//! discipleship (`IsDiscipleOf`). An edge only advances the counter of its
//! own axis, and an edge is dropped as soon as either counter would exceed
//! its cap. There is no cap on the total number of hops.
//!
//! Visited states are keyed on `(avatar, family_depth, sect_depth)`, so the
//! same avatar may be expanded again when it is reached with a different
//! depth pair. The state space is bounded by
//! `avatars * (family + 1) * (sect + 1)`, which also bounds the walk on
//! malformed cyclic graphs.

use std::collections::{BTreeSet, HashSet, VecDeque};

use cultivation_types::{AvatarId, Relation};
use tracing::trace;

use crate::config::ImpartConfig;
use crate::relations::RelationSource;

/// Per-axis depth caps for a lineage search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthLimits {
    /// Maximum number of family-descent edges on a path.
    pub family: u32,
    /// Maximum number of sect-discipleship edges on a path.
    pub sect: u32,
}

/// One node of the breadth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LineageState {
    avatar: AvatarId,
    family_depth: u32,
    sect_depth: u32,
}

impl LineageState {
    const fn root(avatar: AvatarId) -> Self {
        Self {
            avatar,
            family_depth: 0,
            sect_depth: 0,
        }
    }

    /// Follow an edge of kind `relation` to `next`, or `None` if either axis
    /// would exceed its cap.
    fn step(self, next: AvatarId, relation: Relation, limits: DepthLimits) -> Option<Self> {
        let family_depth = self
            .family_depth
            .checked_add(u32::from(relation.is_family_descent()))?;
        let sect_depth = self
            .sect_depth
            .checked_add(u32::from(relation.is_sect_descent()))?;

        if family_depth > limits.family || sect_depth > limits.sect {
            return None;
        }

        Some(Self {
            avatar: next,
            family_depth,
            sect_depth,
        })
    }
}

/// Whether `target` is reachable from `source` through relations of the
/// given kinds without exceeding either depth cap.
///
/// An avatar is never its own descendant. The first path that reaches
/// `target` ends the search.
pub fn is_descendant<G: RelationSource>(
    graph: &G,
    source: AvatarId,
    target: AvatarId,
    edge_kinds: &BTreeSet<Relation>,
    limits: DepthLimits,
) -> bool {
    if target == source {
        return false;
    }

    let mut found = false;
    walk(graph, source, edge_kinds, limits, |state| {
        if state.avatar == target {
            trace!(
                %source,
                %target,
                family_depth = state.family_depth,
                sect_depth = state.sect_depth,
                "lineage path found"
            );
            found = true;
        }
        found
    });
    found
}

/// Every avatar reachable from `source` within the caps, excluding `source`.
///
/// Uses the same traversal rules as [`is_descendant`], so `target` is in the
/// returned set exactly when `is_descendant(.., source, target, ..)` holds.
pub fn eligible_juniors<G: RelationSource>(
    graph: &G,
    source: AvatarId,
    edge_kinds: &BTreeSet<Relation>,
    limits: DepthLimits,
) -> BTreeSet<AvatarId> {
    let mut juniors = BTreeSet::new();
    walk(graph, source, edge_kinds, limits, |state| {
        if state.avatar != source {
            juniors.insert(state.avatar);
        }
        false
    });
    juniors
}

/// The downward-target check used by the impart action.
///
/// Follows the configured edge kinds (`IsChildOf` and `IsDiscipleOf` by
/// default) with the configured family and sect caps.
pub fn is_allowed_downward_target<G: RelationSource>(
    graph: &G,
    initiator: AvatarId,
    target: AvatarId,
    config: &ImpartConfig,
) -> bool {
    is_descendant(
        graph,
        initiator,
        target,
        &config.edge_kinds,
        config.depth_limits(),
    )
}

/// Breadth-first walk shared by the public queries.
///
/// `on_reach` sees every accepted edge destination, including ones already
/// visited at the same depth pair, and stops the walk by returning `true`.
fn walk<G, F>(
    graph: &G,
    source: AvatarId,
    edge_kinds: &BTreeSet<Relation>,
    limits: DepthLimits,
    mut on_reach: F,
) where
    G: RelationSource,
    F: FnMut(LineageState) -> bool,
{
    let root = LineageState::root(source);
    let mut queue = VecDeque::from([root]);
    let mut visited = HashSet::from([root]);

    while let Some(state) = queue.pop_front() {
        for (next, relation) in graph.relations_of(state.avatar) {
            if !edge_kinds.contains(&relation) {
                continue;
            }
            let Some(next_state) = state.step(next, relation, limits) else {
                continue;
            };

            if on_reach(next_state) {
                return;
            }

            if visited.insert(next_state) {
                queue.push_back(next_state);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
