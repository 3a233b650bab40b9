//! Concurrent in-memory record store.
//!
//! [`EventStore`] holds users, events, follow edges and attendance
//! behind one [`tokio::sync::RwLock`]. A single lock keeps the record
//! sets mutually consistent: a cascade delete and a [`Snapshot`] can
//! never interleave, so every snapshot handed to the engine describes
//! one moment in time.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use super::event_entry::{EventEntry, EventSummary, UpsertOutcome};
use super::{AttendanceSet, Event, EventId, FollowEdge, Snapshot, User, UserId};
use crate::engine::SocialGraph;
use crate::error::SelectorError;

/// What a cascading user removal took with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRemoval {
    /// The removed user record.
    pub user: User,
    /// Events hosted by the user that were removed.
    pub events_removed: Vec<EventId>,
    /// Follow edges starting or ending at the user.
    pub edges_removed: usize,
    /// Attendance records removed (the user's own and those of removed events).
    pub attendance_removed: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    events: HashMap<EventId, EventEntry>,
    follows: HashSet<FollowEdge>,
    attendance: AttendanceSet,
    next_seq: u64,
}

impl StoreState {
    fn ordered_entries(&self) -> Vec<&EventEntry> {
        let mut entries: Vec<&EventEntry> = self.events.values().collect();
        entries.sort_by_key(|entry| entry.seq);
        entries
    }

    fn catalog(&self) -> Vec<Event> {
        self.ordered_entries()
            .into_iter()
            .map(|entry| entry.event.clone())
            .collect()
    }

    fn follower_ids(&self, user: &UserId) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .follows
            .iter()
            .filter(|edge| &edge.followee == user)
            .map(|edge| edge.follower.clone())
            .collect();
        ids.sort();
        ids
    }

    fn followee_ids(&self, user: &UserId) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .follows
            .iter()
            .filter(|edge| &edge.follower == user)
            .map(|edge| edge.followee.clone())
            .collect();
        ids.sort();
        ids
    }

    fn resolve_users<'a, I>(&self, ids: I) -> Vec<User>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        ids.into_iter()
            .filter_map(|id| self.users.get(id).cloned())
            .collect()
    }

    fn remove_event(&mut self, event_id: &EventId) -> Option<(EventEntry, usize)> {
        let entry = self.events.remove(event_id)?;
        let dropped = self.attendance.remove_event(event_id);
        Some((entry, dropped))
    }
}

/// Central store for users, events, follow edges and attendance.
///
/// # Concurrency
///
/// - Reads (queries, snapshots) run concurrently.
/// - Writes are serialized and atomic with respect to snapshots.
#[derive(Debug, Default)]
pub struct EventStore {
    state: RwLock<StoreState>,
}

impl EventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Inserts or overwrites a user record.
    ///
    /// Returns `true` if the user did not exist before.
    pub async fn upsert_user(&self, user: User) -> bool {
        let mut state = self.state.write().await;
        state.users.insert(user.id.clone(), user).is_none()
    }

    /// Returns a copy of the user record.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UserNotFound`] if no such user exists.
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, SelectorError> {
        let state = self.state.read().await;
        state
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| SelectorError::UserNotFound(user_id.clone()))
    }

    /// Finds a user by exact email address.
    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read().await;
        state
            .users
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned()
    }

    /// Replaces an existing user record.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UserNotFound`] if the user does not exist.
    pub async fn update_user(&self, user: User) -> Result<(), SelectorError> {
        let mut state = self.state.write().await;
        let slot = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| SelectorError::UserNotFound(user.id.clone()))?;
        *slot = user;
        Ok(())
    }

    /// Removes a user together with everything that references them:
    /// hosted events (and their attendance), follow edges in either
    /// direction, and the user's own attendance records.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UserNotFound`] if the user does not exist.
    pub async fn remove_user(&self, user_id: &UserId) -> Result<UserRemoval, SelectorError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .remove(user_id)
            .ok_or_else(|| SelectorError::UserNotFound(user_id.clone()))?;

        let hosted: Vec<EventId> = state
            .ordered_entries()
            .into_iter()
            .filter(|entry| entry.event.is_hosted_by(user_id))
            .map(|entry| entry.event.id.clone())
            .collect();

        let mut attendance_removed = 0;
        for event_id in &hosted {
            if let Some((_, dropped)) = state.remove_event(event_id) {
                attendance_removed += dropped;
            }
        }

        let edges_before = state.follows.len();
        state.follows.retain(|edge| !edge.touches(user_id));
        let edges_removed = edges_before - state.follows.len();

        attendance_removed += state.attendance.remove_user(user_id);
        tracing::debug!(
            %user_id,
            hosted = hosted.len(),
            edges_removed,
            attendance_removed,
            "user cascade applied"
        );

        Ok(UserRemoval {
            user,
            events_removed: hosted,
            edges_removed,
            attendance_removed,
        })
    }

    /// Returns the records for `ids`, in the given order, skipping ids
    /// with no user record.
    pub async fn users_by_ids<'a, I>(&self, ids: I) -> Vec<User>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        self.state.read().await.resolve_users(ids)
    }

    /// All user records, sorted by id.
    pub async fn users(&self) -> Vec<User> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    /// Number of users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Inserts an event, or replaces it whole if its id already exists.
    ///
    /// A replacement keeps the event's position in catalog order.
    pub async fn upsert_event(&self, event: Event) -> UpsertOutcome {
        let mut state = self.state.write().await;
        if let Some(entry) = state.events.get_mut(&event.id) {
            entry.replace(event);
            return UpsertOutcome::Replaced {
                revision: entry.revision,
            };
        }
        let seq = state.next_seq;
        state.next_seq = state.next_seq.saturating_add(1);
        state
            .events
            .insert(event.id.clone(), EventEntry::new(event, seq));
        UpsertOutcome::Created
    }

    /// Replaces an existing event whole.
    ///
    /// Returns the new revision number.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn replace_event(&self, event: Event) -> Result<u64, SelectorError> {
        let mut state = self.state.write().await;
        let entry = state
            .events
            .get_mut(&event.id)
            .ok_or_else(|| SelectorError::EventNotFound(event.id.clone()))?;
        entry.replace(event);
        Ok(entry.revision)
    }

    /// Returns a copy of the current event version.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: &EventId) -> Result<Event, SelectorError> {
        let state = self.state.read().await;
        state
            .events
            .get(event_id)
            .map(|entry| entry.event.clone())
            .ok_or_else(|| SelectorError::EventNotFound(event_id.clone()))
    }

    /// Removes an event and every attendance record for it.
    ///
    /// Returns the removed event and the number of attendance records
    /// dropped with it.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn remove_event(&self, event_id: &EventId) -> Result<(Event, usize), SelectorError> {
        let mut state = self.state.write().await;
        state
            .remove_event(event_id)
            .map(|(entry, dropped)| (entry.event, dropped))
            .ok_or_else(|| SelectorError::EventNotFound(event_id.clone()))
    }

    /// All events in catalog order.
    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.catalog()
    }

    /// Events in catalog order for which `predicate` holds.
    pub async fn events_matching<F>(&self, predicate: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        let state = self.state.read().await;
        state
            .ordered_entries()
            .into_iter()
            .filter(|entry| predicate(&entry.event))
            .map(|entry| entry.event.clone())
            .collect()
    }

    /// Summaries of all events in catalog order.
    pub async fn summaries(&self) -> Vec<EventSummary> {
        let state = self.state.read().await;
        state
            .ordered_entries()
            .into_iter()
            .map(EventSummary::from)
            .collect()
    }

    /// Number of events.
    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    // ── Follow graph ────────────────────────────────────────────────────

    /// Adds the edge `follower → followee`.
    ///
    /// Returns `false` if the edge already existed.
    pub async fn follow(&self, follower: UserId, followee: UserId) -> bool {
        let mut state = self.state.write().await;
        state.follows.insert(FollowEdge { follower, followee })
    }

    /// Removes the edge `follower → followee`.
    ///
    /// Returns `false` if there was no such edge.
    pub async fn unfollow(&self, follower: &UserId, followee: &UserId) -> bool {
        let mut state = self.state.write().await;
        let before = state.follows.len();
        state
            .follows
            .retain(|edge| !(&edge.follower == follower && &edge.followee == followee));
        state.follows.len() != before
    }

    /// Ids of users following `user`, sorted.
    pub async fn followers_of(&self, user: &UserId) -> Vec<UserId> {
        self.state.read().await.follower_ids(user)
    }

    /// Ids of users `user` follows, sorted.
    pub async fn following_of(&self, user: &UserId) -> Vec<UserId> {
        self.state.read().await.followee_ids(user)
    }

    /// Records of users following `user`, sorted by id. Followers without
    /// a user record are skipped.
    pub async fn follower_users(&self, user: &UserId) -> Vec<User> {
        let state = self.state.read().await;
        state.resolve_users(&state.follower_ids(user))
    }

    /// Records of users `user` follows, sorted by id. Followees without a
    /// user record are skipped.
    pub async fn followee_users(&self, user: &UserId) -> Vec<User> {
        let state = self.state.read().await;
        state.resolve_users(&state.followee_ids(user))
    }

    // ── Attendance ──────────────────────────────────────────────────────

    /// Records that `user` attends `event`.
    ///
    /// Capacity is not checked: attending an event whose attendee count
    /// already equals `max_attendees` succeeds. Returns `false` if the
    /// user was already attending.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn attend(&self, event: &EventId, user: UserId) -> Result<bool, SelectorError> {
        let mut state = self.state.write().await;
        if !state.events.contains_key(event) {
            return Err(SelectorError::EventNotFound(event.clone()));
        }
        Ok(state.attendance.insert(event.clone(), user))
    }

    /// Removes `user` from `event`'s attendance. Returns `false` if the
    /// user was not attending.
    pub async fn leave(&self, event: &EventId, user: &UserId) -> bool {
        self.state.write().await.attendance.remove(event, user)
    }

    /// Ids of users attending `event`, sorted.
    pub async fn attendees_of(&self, event: &EventId) -> Vec<UserId> {
        let state = self.state.read().await;
        state.attendance.attendees_of(event).cloned().collect()
    }

    /// Records of users attending `event`, sorted by id. Attendees
    /// without a user record are skipped.
    pub async fn attendee_users(&self, event: &EventId) -> Vec<User> {
        let state = self.state.read().await;
        state.resolve_users(state.attendance.attendees_of(event))
    }

    /// Number of users attending `event`.
    pub async fn attendee_count(&self, event: &EventId) -> usize {
        self.state.read().await.attendance.count_for(event)
    }

    /// Returns `true` if `user` attends `event`.
    pub async fn is_attending(&self, event: &EventId, user: &UserId) -> bool {
        self.state.read().await.attendance.contains(event, user)
    }

    /// Events `user` attends, in catalog order.
    pub async fn events_attended_by(&self, user: &UserId) -> Vec<Event> {
        let state = self.state.read().await;
        state
            .ordered_entries()
            .into_iter()
            .filter(|entry| state.attendance.contains(&entry.event.id, user))
            .map(|entry| entry.event.clone())
            .collect()
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Copies catalog, graph and attendance under one read lock.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            catalog: state.catalog(),
            graph: SocialGraph::from_edges(state.follows.iter().cloned()),
            attendance: state.attendance.clone(),
        }
    }
}
