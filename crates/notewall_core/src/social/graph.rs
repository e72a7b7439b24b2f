//! Relationship-query capability consumed by comment policy checks.

use crate::model::note::UserId;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Answers relationship questions between two users.
///
/// Implementations must be symmetric: `is_friend(a, b) == is_friend(b, a)`.
pub trait RelationshipGraph {
    /// Returns whether `a` and `b` are direct friends.
    fn is_friend(&self, a: UserId, b: UserId) -> bool;
    /// Returns whether `a` and `b` are two hops apart.
    fn is_friend_of_friend(&self, a: UserId, b: UserId) -> bool;
}

impl<G: RelationshipGraph + ?Sized> RelationshipGraph for &G {
    fn is_friend(&self, a: UserId, b: UserId) -> bool {
        (**self).is_friend(a, b)
    }

    fn is_friend_of_friend(&self, a: UserId, b: UserId) -> bool {
        (**self).is_friend_of_friend(a, b)
    }
}

impl<G: RelationshipGraph + ?Sized> RelationshipGraph for Arc<G> {
    fn is_friend(&self, a: UserId, b: UserId) -> bool {
        (**self).is_friend(a, b)
    }

    fn is_friend_of_friend(&self, a: UserId, b: UserId) -> bool {
        (**self).is_friend_of_friend(a, b)
    }
}

/// Placeholder graph over numeric ids.
///
/// Friends differ by exactly 1, friends-of-friends by exactly 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjacentIdGraph;

impl RelationshipGraph for AdjacentIdGraph {
    fn is_friend(&self, a: UserId, b: UserId) -> bool {
        a.abs_diff(b) == 1
    }

    fn is_friend_of_friend(&self, a: UserId, b: UserId) -> bool {
        a.abs_diff(b) == 2
    }
}

/// Graph backed by an explicit, symmetric friendship set.
///
/// A friend-of-friend is reachable in two hops, and is neither the user
/// itself nor a direct friend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRelationshipGraph {
    friends: BTreeMap<UserId, BTreeSet<UserId>>,
}

impl StaticRelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from friendship pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (UserId, UserId)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in pairs {
            graph.add_friendship(a, b);
        }
        graph
    }

    /// Records a friendship in both directions.
    ///
    /// Returns `false` for self-links and already known pairs.
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.friends.entry(a).or_default().insert(b);
        self.friends.entry(b).or_default().insert(a);
        inserted
    }

    /// Returns direct friends of `user` in ascending id order.
    pub fn friends_of(&self, user: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.friends
            .get(&user)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

impl RelationshipGraph for StaticRelationshipGraph {
    fn is_friend(&self, a: UserId, b: UserId) -> bool {
        self.friends.get(&a).is_some_and(|set| set.contains(&b))
    }

    fn is_friend_of_friend(&self, a: UserId, b: UserId) -> bool {
        if a == b || self.is_friend(a, b) {
            return false;
        }
        self.friends_of(a).any(|middle| self.is_friend(middle, b))
    }
}
