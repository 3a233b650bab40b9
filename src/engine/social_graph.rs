//! Read-only view over follow edges.
//!
//! [`SocialGraph`] is built once from a snapshot of [`FollowEdge`]s and
//! answers adjacency questions in both directions. It has no mutation
//! API: edges are added and removed by the store, which hands the engine
//! a fresh graph for every selection.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::domain::{FollowEdge, UserId};

/// Directed follow graph with forward and reverse adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialGraph {
    following: HashMap<UserId, HashSet<UserId>>,
    followers: HashMap<UserId, HashSet<UserId>>,
}

impl SocialGraph {
    /// Creates a graph with no edges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge collection. Duplicate edges collapse.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = FollowEdge>,
    {
        let mut following: HashMap<UserId, HashSet<UserId>> = HashMap::new();
        let mut followers: HashMap<UserId, HashSet<UserId>> = HashMap::new();
        for edge in edges {
            followers
                .entry(edge.followee.clone())
                .or_default()
                .insert(edge.follower.clone());
            following
                .entry(edge.follower)
                .or_default()
                .insert(edge.followee);
        }
        Self {
            following,
            followers,
        }
    }

    /// Returns `true` iff the edge `a → b` exists.
    #[must_use]
    pub fn follows(&self, a: &UserId, b: &UserId) -> bool {
        self.following.get(a).is_some_and(|set| set.contains(b))
    }

    /// Returns `true` iff `a` and `b` follow each other.
    #[must_use]
    pub fn is_mutual(&self, a: &UserId, b: &UserId) -> bool {
        self.follows(a, b) && self.follows(b, a)
    }

    /// All users `x` with an edge `x → user`.
    #[must_use]
    pub fn followers_of(&self, user: &UserId) -> BTreeSet<&UserId> {
        self.followers
            .get(user)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// All users `x` with an edge `user → x`.
    #[must_use]
    pub fn following_of(&self, user: &UserId) -> BTreeSet<&UserId> {
        self.following
            .get(user)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.following.values().map(HashSet::len).sum()
    }
}

impl FromIterator<FollowEdge> for SocialGraph {
    fn from_iter<I: IntoIterator<Item = FollowEdge>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
