//! Per-event visibility decisions.
//!
//! The decision table, evaluated top to bottom:
//!
//! | Condition                        | Decision                                   |
//! |----------------------------------|--------------------------------------------|
//! | viewer is the host               | Visible                                    |
//! | class is `Public`                | Visible                                    |
//! | class is `FollowerOnly`          | Visible iff viewer follows host            |
//! | class is `FriendOnly`            | Visible iff viewer and host follow each other |
//!
//! A viewer missing from the graph follows nobody and is followed by
//! nobody, so only public events and their own events are visible.

use crate::domain::{Event, UserId, VisibilityClass};

use super::SocialGraph;

/// Outcome of a visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The viewer may see the event.
    Visible,
    /// The event is withheld from the viewer.
    Hidden,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Visible`].
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }
}

/// Visibility policy bound to one social-graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityPolicy<'g> {
    graph: &'g SocialGraph,
}

impl<'g> VisibilityPolicy<'g> {
    /// Creates a policy reading from `graph`.
    #[must_use]
    pub const fn new(graph: &'g SocialGraph) -> Self {
        Self { graph }
    }

    /// Decides whether `viewer` may see `event`.
    #[must_use]
    pub fn decide(&self, event: &Event, viewer: &UserId) -> Visibility {
        if event.is_hosted_by(viewer) {
            return Visibility::Visible;
        }
        let host = &event.host_id;
        match event.visibility {
            VisibilityClass::Public => Visibility::Visible,
            VisibilityClass::FollowerOnly => self.graph.follows(viewer, host).into(),
            VisibilityClass::FriendOnly => self.graph.is_mutual(viewer, host).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, FollowEdge};

    fn event(host: &str, visibility: VisibilityClass) -> Event {
        Event {
            id: EventId::from("e1"),
            name: "Board games".to_string(),
            description: String::new(),
            host_id: UserId::from(host),
            address: "1 Main St".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            date: "2025-01-01".to_string(),
            start_time: "18:00".to_string(),
            end_time: "22:00".to_string(),
            estimated_cost: 0.0,
            max_attendees: 8,
            tags: String::new(),
            visibility,
        }
    }

    fn u(id: &str) -> UserId {
        UserId::from(id)
    }

    #[test]
    fn host_always_sees_own_event() {
        let empty = SocialGraph::new();
        let policy = VisibilityPolicy::new(&empty);
        for class in [
            VisibilityClass::Public,
            VisibilityClass::FollowerOnly,
            VisibilityClass::FriendOnly,
        ] {
            assert_eq!(policy.decide(&event("u1", class), &u("u1")), Visibility::Visible);
        }
    }

    #[test]
    fn public_visible_to_strangers() {
        let empty = SocialGraph::new();
        let policy = VisibilityPolicy::new(&empty);
        let decision = policy.decide(&event("u1", VisibilityClass::Public), &u("stranger"));
        assert!(decision.is_visible());
    }

    #[test]
    fn follower_only_requires_viewer_to_follow_host() {
        let host_follows_viewer = SocialGraph::from_edges([FollowEdge::new("u1", "u2")]);
        let policy = VisibilityPolicy::new(&host_follows_viewer);
        let e = event("u1", VisibilityClass::FollowerOnly);
        assert_eq!(policy.decide(&e, &u("u2")), Visibility::Hidden);

        let viewer_follows_host = SocialGraph::from_edges([FollowEdge::new("u2", "u1")]);
        let policy = VisibilityPolicy::new(&viewer_follows_host);
        assert_eq!(policy.decide(&e, &u("u2")), Visibility::Visible);
    }

    #[test]
    fn friend_only_requires_mutual_follow() {
        let e = event("u1", VisibilityClass::FriendOnly);

        let one_way = SocialGraph::from_edges([FollowEdge::new("u2", "u1")]);
        assert_eq!(
            VisibilityPolicy::new(&one_way).decide(&e, &u("u2")),
            Visibility::Hidden
        );

        let other_way = SocialGraph::from_edges([FollowEdge::new("u1", "u2")]);
        assert_eq!(
            VisibilityPolicy::new(&other_way).decide(&e, &u("u2")),
            Visibility::Hidden
        );

        let mutual =
            SocialGraph::from_edges([FollowEdge::new("u1", "u2"), FollowEdge::new("u2", "u1")]);
        assert_eq!(
            VisibilityPolicy::new(&mutual).decide(&e, &u("u2")),
            Visibility::Visible
        );
    }

    #[test]
    fn unknown_viewer_sees_only_public() {
        let graph = SocialGraph::from_edges([FollowEdge::new("u2", "u1")]);
        let policy = VisibilityPolicy::new(&graph);
        let ghost = u("ghost");
        assert!(policy.decide(&event("u1", VisibilityClass::Public), &ghost).is_visible());
        assert!(!policy.decide(&event("u1", VisibilityClass::FollowerOnly), &ghost).is_visible());
        assert!(!policy.decide(&event("u1", VisibilityClass::FriendOnly), &ghost).is_visible());
    }
}
