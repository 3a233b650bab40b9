//! Attendance records and the indexed attendance set.
//!
//! [`AttendanceSet`] keeps two indexes (event → users, user → events) so
//! that both membership checks made by the selector and the per-user
//! listings made by the adapter are map lookups rather than scans.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{EventId, UserId};

/// `user_id` is attending `event_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Event being attended.
    pub event_id: EventId,
    /// Attending user.
    pub user_id: UserId,
}

impl AttendanceRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(event_id: impl Into<EventId>, user_id: impl Into<UserId>) -> Self {
        Self {
            event_id: event_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Set of [`AttendanceRecord`]s with idempotent insert and remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSet {
    by_event: HashMap<EventId, BTreeSet<UserId>>,
    by_user: HashMap<UserId, BTreeSet<EventId>>,
}

impl AttendanceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `user` attends `event`.
    ///
    /// Returns `false` if the record was already present.
    pub fn insert(&mut self, event: EventId, user: UserId) -> bool {
        let inserted = self
            .by_event
            .entry(event.clone())
            .or_default()
            .insert(user.clone());
        if inserted {
            self.by_user.entry(user).or_default().insert(event);
        }
        inserted
    }

    /// Removes the record for (`event`, `user`).
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn remove(&mut self, event: &EventId, user: &UserId) -> bool {
        let removed = match self.by_event.get_mut(event) {
            Some(users) => {
                let removed = users.remove(user);
                if users.is_empty() {
                    self.by_event.remove(event);
                }
                removed
            }
            None => false,
        };
        if removed && let Some(events) = self.by_user.get_mut(user) {
            events.remove(event);
            if events.is_empty() {
                self.by_user.remove(user);
            }
        }
        removed
    }

    /// Drops every record for `event`, returning how many were removed.
    pub fn remove_event(&mut self, event: &EventId) -> usize {
        let Some(users) = self.by_event.remove(event) else {
            return 0;
        };
        for user in &users {
            if let Some(events) = self.by_user.get_mut(user) {
                events.remove(event);
                if events.is_empty() {
                    self.by_user.remove(user);
                }
            }
        }
        users.len()
    }

    /// Drops every record for `user`, returning how many were removed.
    pub fn remove_user(&mut self, user: &UserId) -> usize {
        let Some(events) = self.by_user.remove(user) else {
            return 0;
        };
        for event in &events {
            if let Some(users) = self.by_event.get_mut(event) {
                users.remove(user);
                if users.is_empty() {
                    self.by_event.remove(event);
                }
            }
        }
        events.len()
    }

    /// Returns `true` if `user` attends `event`.
    #[must_use]
    pub fn contains(&self, event: &EventId, user: &UserId) -> bool {
        self.by_event
            .get(event)
            .is_some_and(|users| users.contains(user))
    }

    /// Number of users attending `event`.
    #[must_use]
    pub fn count_for(&self, event: &EventId) -> usize {
        self.by_event.get(event).map_or(0, BTreeSet::len)
    }

    /// Users attending `event`, in identifier order.
    pub fn attendees_of<'a>(&'a self, event: &EventId) -> impl Iterator<Item = &'a UserId> + 'a {
        self.by_event.get(event).into_iter().flatten()
    }

    /// Events attended by `user`, in identifier order.
    pub fn events_of<'a>(&'a self, user: &UserId) -> impl Iterator<Item = &'a EventId> + 'a {
        self.by_user.get(user).into_iter().flatten()
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_event.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_event.is_empty()
    }

    /// Iterates over all records (unordered across events).
    pub fn records(&self) -> impl Iterator<Item = AttendanceRecord> + '_ {
        self.by_event.iter().flat_map(|(event, users)| {
            users
                .iter()
                .map(move |user| AttendanceRecord::new(event.clone(), user.clone()))
        })
    }
}

impl FromIterator<AttendanceRecord> for AttendanceSet {
    fn from_iter<I: IntoIterator<Item = AttendanceRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<AttendanceRecord> for AttendanceSet {
    fn extend<I: IntoIterator<Item = AttendanceRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record.event_id, record.user_id);
        }
    }
}
