//! Event selection: base set, visibility gate, predicate conjunction.
//!
//! [`EventSelector`] is the single implementation of the selection
//! rules. The in-memory adapter calls it with a store snapshot; any
//! other adapter would hand it the same three inputs.
//!
//! # Algorithm
//!
//! 1. Partition criteria into identity filters and predicate filters.
//! 2. Base set: with identity filters present, catalog events admitted
//!    by ANY of them, de-duplicated by event id (first occurrence
//!    wins); otherwise the whole catalog as given.
//! 3. Drop events hidden from the viewer.
//! 4. Keep events passing ALL predicate filters.
//!
//! Output preserves catalog order. Cost is O(N·M) for N events and M
//! criteria, plus one hash lookup per event for de-duplication.

use std::collections::HashSet;

use crate::domain::{AttendanceSet, Event, EventId, UserId};

use super::filter::{FilterCriterion, PartitionedCriteria};
use super::visibility::VisibilityPolicy;
use super::SocialGraph;

/// Selection engine bound to one graph and attendance snapshot.
#[derive(Debug, Clone, Copy)]
pub struct EventSelector<'s> {
    graph: &'s SocialGraph,
    attendance: &'s AttendanceSet,
}

impl<'s> EventSelector<'s> {
    /// Creates a selector over the given snapshot parts.
    #[must_use]
    pub const fn new(graph: &'s SocialGraph, attendance: &'s AttendanceSet) -> Self {
        Self { graph, attendance }
    }

    /// Returns the visibility policy this selector applies.
    #[must_use]
    pub const fn policy(&self) -> VisibilityPolicy<'s> {
        VisibilityPolicy::new(self.graph)
    }

    /// Selects the events of `catalog` that `viewer` may see and that
    /// satisfy `criteria`.
    #[must_use]
    pub fn select<'c>(
        &self,
        catalog: &'c [Event],
        viewer: &UserId,
        criteria: &[FilterCriterion],
    ) -> Vec<&'c Event> {
        let parts = PartitionedCriteria::partition(criteria);
        let policy = self.policy();

        let use_identity = !parts.identity.is_empty();
        let mut seen: HashSet<&'c EventId> = HashSet::new();
        let mut selected = Vec::new();

        for event in catalog {
            if use_identity
                && !(parts.admitted_by_any(event, self.attendance) && seen.insert(&event.id))
            {
                continue;
            }
            if !policy.decide(event, viewer).is_visible() {
                continue;
            }
            if parts.passes_all(event) {
                selected.push(event);
            }
        }
        selected
    }
}

/// Convenience wrapper over [`EventSelector::select`] taking every
/// input explicitly.
#[must_use]
pub fn select<'c>(
    catalog: &'c [Event],
    viewer: &UserId,
    criteria: &[FilterCriterion],
    attendance: &AttendanceSet,
    graph: &SocialGraph,
) -> Vec<&'c Event> {
    EventSelector::new(graph, attendance).select(catalog, viewer, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AttendanceRecord, FollowEdge, VisibilityClass};

    fn ev(id: &str, host: &str, visibility: VisibilityClass) -> Event {
        Event {
            id: EventId::from(id),
            name: format!("event {id}"),
            description: String::new(),
            host_id: UserId::from(host),
            address: "200 University Ave W".to_string(),
            latitude: 43.4723,
            longitude: -80.5449,
            date: "2025-10-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            estimated_cost: 0.0,
            max_attendees: 10,
            tags: String::new(),
            visibility,
        }
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn empty_catalog_yields_empty() {
        let graph = SocialGraph::new();
        let attendance = AttendanceSet::new();
        let out = select(&[], &UserId::from("u1"), &[], &attendance, &graph);
        assert!(out.is_empty());
    }

    #[test]
    fn no_criteria_returns_visible_catalog_in_order() {
        let catalog = vec![
            ev("e1", "u1", VisibilityClass::Public),
            ev("e2", "u1", VisibilityClass::FriendOnly),
            ev("e3", "u3", VisibilityClass::Public),
        ];
        let graph = SocialGraph::new();
        let attendance = AttendanceSet::new();
        let out = select(&catalog, &UserId::from("u2"), &[], &attendance, &graph);
        assert_eq!(ids(&out), vec!["e1", "e3"]);
    }

    #[test]
    fn duplicates_pass_through_without_identity_filters() {
        let catalog = vec![
            ev("e1", "u1", VisibilityClass::Public),
            ev("e1", "u1", VisibilityClass::Public),
        ];
        let graph = SocialGraph::new();
        let attendance = AttendanceSet::new();
        let out = select(&catalog, &UserId::from("u2"), &[], &attendance, &graph);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn identity_union_deduplicates() {
        let catalog = vec![
            ev("e1", "u1", VisibilityClass::Public),
            ev("e2", "u3", VisibilityClass::Public),
            ev("e3", "u3", VisibilityClass::Public),
            ev("e1", "u1", VisibilityClass::Public),
        ];
        let attendance: AttendanceSet = [
            AttendanceRecord::new("e1", "u1"),
            AttendanceRecord::new("e2", "u1"),
        ]
        .into_iter()
        .collect();
        let graph = SocialGraph::new();
        let criteria = [FilterCriterion::hosted_by("u1"), FilterCriterion::attending("u1")];
        let out = select(&catalog, &UserId::from("u1"), &criteria, &attendance, &graph);
        assert_eq!(ids(&out), vec!["e1", "e2"]);
    }

    #[test]
    fn identity_filter_does_not_bypass_visibility() {
        let catalog = vec![ev("e1", "u1", VisibilityClass::FollowerOnly)];
        let graph = SocialGraph::new();
        let attendance = AttendanceSet::new();
        let criteria = [FilterCriterion::hosted_by("u1")];
        let out = select(&catalog, &UserId::from("u2"), &criteria, &attendance, &graph);
        assert!(out.is_empty());

        let graph = SocialGraph::from_edges([FollowEdge::new("u2", "u1")]);
        let out = select(&catalog, &UserId::from("u2"), &criteria, &attendance, &graph);
        assert_eq!(ids(&out), vec!["e1"]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let mut cheap = ev("e1", "u1", VisibilityClass::Public);
        cheap.tags = "food".to_string();
        let mut pricey = ev("e2", "u1", VisibilityClass::Public);
        pricey.tags = "food".to_string();
        pricey.estimated_cost = 50.0;
        let catalog = vec![cheap, pricey];

        let graph = SocialGraph::new();
        let attendance = AttendanceSet::new();
        let criteria = [FilterCriterion::tag("food"), FilterCriterion::cost(10.0)];
        let out = select(&catalog, &UserId::from("u2"), &criteria, &attendance, &graph);
        assert_eq!(ids(&out), vec!["e1"]);
    }

    #[test]
    fn selector_is_reusable_across_viewers() {
        let catalog = vec![ev("e1", "u1", VisibilityClass::FriendOnly)];
        let graph =
            SocialGraph::from_edges([FollowEdge::new("u1", "u2"), FollowEdge::new("u2", "u1")]);
        let attendance = AttendanceSet::new();
        let selector = EventSelector::new(&graph, &attendance);

        assert_eq!(selector.select(&catalog, &UserId::from("u2"), &[]).len(), 1);
        assert!(selector.select(&catalog, &UserId::from("u3"), &[]).is_empty());
        assert_eq!(selector.select(&catalog, &UserId::from("u1"), &[]).len(), 1);
    }
}
