//! Consistent point-in-time copy of everything the engine reads.

use crate::engine::{EventSelector, FilterCriterion, SocialGraph};

use super::{AttendanceSet, Event, UserId};

/// Catalog, follow graph and attendance captured together.
///
/// Produced by [`super::EventStore::snapshot`] under a single read lock,
/// so the three parts always agree with each other. Selections run on
/// the snapshot without holding any lock.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Events in catalog (creation) order.
    pub catalog: Vec<Event>,
    /// Follow graph.
    pub graph: SocialGraph,
    /// Attendance records.
    pub attendance: AttendanceSet,
}

impl Snapshot {
    /// Runs a selection for `viewer` against this snapshot.
    #[must_use]
    pub fn select(&self, viewer: &UserId, criteria: &[FilterCriterion]) -> Vec<&Event> {
        EventSelector::new(&self.graph, &self.attendance).select(&self.catalog, viewer, criteria)
    }
}
