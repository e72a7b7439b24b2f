//! Comment-privacy tier evaluation.
//!
//! # Invariants
//! - The note owner may always comment.
//! - Unknown tiers deny everyone but the owner.

use crate::model::note::{CommentPrivacy, UserId};
use crate::social::graph::RelationshipGraph;

/// Returns whether `actor` may comment on a note owned by `owner`.
pub fn can_comment<G: RelationshipGraph + ?Sized>(
    graph: &G,
    actor: UserId,
    owner: UserId,
    privacy: CommentPrivacy,
) -> bool {
    if actor == owner {
        return true;
    }

    match privacy {
        CommentPrivacy::Everyone => true,
        CommentPrivacy::Friends => graph.is_friend(actor, owner),
        CommentPrivacy::FriendsOfFriends => {
            graph.is_friend(actor, owner) || graph.is_friend_of_friend(actor, owner)
        }
        CommentPrivacy::OwnerOnly | CommentPrivacy::Other(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::can_comment;
    use crate::model::note::CommentPrivacy;
    use crate::social::graph::{AdjacentIdGraph, StaticRelationshipGraph};

    #[test]
    fn owner_can_comment_under_every_tier() {
        for tier in [0, 1, 2, 3, 42] {
            assert!(can_comment(
                &AdjacentIdGraph,
                8,
                8,
                CommentPrivacy::from_tier(tier)
            ));
        }
    }

    #[test]
    fn friends_tier_admits_only_direct_friends() {
        let tier = CommentPrivacy::Friends;
        assert!(can_comment(&AdjacentIdGraph, 2, 1, tier));
        assert!(!can_comment(&AdjacentIdGraph, 3, 1, tier));
    }

    #[test]
    fn friends_of_friends_tier_admits_two_hops() {
        let tier = CommentPrivacy::FriendsOfFriends;
        assert!(can_comment(&AdjacentIdGraph, 2, 1, tier));
        assert!(can_comment(&AdjacentIdGraph, 3, 1, tier));
        assert!(!can_comment(&AdjacentIdGraph, 4, 1, tier));
    }

    #[test]
    fn owner_only_and_unknown_tiers_deny_others() {
        assert!(!can_comment(&AdjacentIdGraph, 2, 1, CommentPrivacy::OwnerOnly));
        assert!(!can_comment(&AdjacentIdGraph, 2, 1, CommentPrivacy::Other(9)));
    }

    #[test]
    fn everyone_tier_ignores_the_graph() {
        let empty = StaticRelationshipGraph::new();
        assert!(can_comment(&empty, 100, 1, CommentPrivacy::Everyone));
        assert!(!can_comment(&empty, 100, 1, CommentPrivacy::Friends));
    }
}
