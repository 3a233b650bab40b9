//! Directed follow relationships.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Directed edge `follower → followee`.
///
/// A set of edges forms the social graph. Edges carry no payload, so two
/// insertions of the same pair are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowEdge {
    /// The user doing the following.
    pub follower: UserId,
    /// The user being followed.
    pub followee: UserId,
}

impl FollowEdge {
    /// Creates an edge `follower → followee`.
    #[must_use]
    pub fn new(follower: impl Into<UserId>, followee: impl Into<UserId>) -> Self {
        Self {
            follower: follower.into(),
            followee: followee.into(),
        }
    }

    /// Returns `true` if the edge starts or ends at `user`.
    #[must_use]
    pub fn touches(&self, user: &UserId) -> bool {
        &self.follower == user || &self.followee == user
    }
}
