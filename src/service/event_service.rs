//! Event service: record operations, queries, and filtered selection.

use std::sync::Arc;

use crate::domain::{
    Event, EventId, EventStore, EventSummary, UpsertOutcome, User, UserId, UserRemoval,
};
use crate::engine::{FilterCriterion, PredicateFilter, search};
use crate::error::SelectorError;
use crate::seed::{SeedData, SeedSummary};

use super::validation::{EventDraft, validate_event, validate_user};

/// Default catalog size above which selections log a warning.
pub const DEFAULT_CATALOG_WARN_THRESHOLD: usize = 10_000;

/// Orchestration layer over the [`EventStore`].
///
/// Stateless coordinator: every mutation validates its input, applies
/// it to the store, and logs the outcome. Every selection takes one
/// store snapshot and runs the engine on it, so the store lock is never
/// held while filters are evaluated.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<EventStore>,
    catalog_warn_threshold: usize,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<EventStore>) -> Self {
        Self {
            store,
            catalog_warn_threshold: DEFAULT_CATALOG_WARN_THRESHOLD,
        }
    }

    /// Sets the catalog size above which selections log a warning.
    /// Selections are never refused.
    #[must_use]
    pub fn with_catalog_warn_threshold(mut self, threshold: usize) -> Self {
        self.catalog_warn_threshold = threshold;
        self
    }

    /// Returns a reference to the inner [`EventStore`].
    #[must_use]
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Registers a user, overwriting any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] if the id or name is blank.
    pub async fn create_user(&self, user: User) -> Result<(), SelectorError> {
        validate_user(&user.id, &user.name)?;
        let user_id = user.id.clone();
        let created = self.store.upsert_user(user).await;
        tracing::info!(%user_id, created, "user saved");
        Ok(())
    }

    /// Returns a user record.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UserNotFound`] if no such user exists.
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, SelectorError> {
        self.store.get_user(user_id).await
    }

    /// Finds a user by email address.
    pub async fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.store.find_user_by_email(email).await
    }

    /// Every user record, sorted by id.
    pub async fn all_users(&self) -> Vec<User> {
        self.store.users().await
    }

    /// Users whose id or name contains `query` (case-insensitive). A
    /// blank query returns every user.
    pub async fn search_users(&self, query: &str) -> Vec<User> {
        search::search_users(self.store.users().await, query)
    }

    /// Replaces an existing user record.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] on blank fields or
    /// [`SelectorError::UserNotFound`] if the user does not exist.
    pub async fn update_user(&self, user: User) -> Result<(), SelectorError> {
        validate_user(&user.id, &user.name)?;
        self.store.update_user(user).await
    }

    /// Deletes a user and everything that references them.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::UserNotFound`] if the user does not exist.
    pub async fn delete_user(&self, user_id: &UserId) -> Result<UserRemoval, SelectorError> {
        let removal = self.store.remove_user(user_id).await?;
        tracing::info!(
            %user_id,
            events = removal.events_removed.len(),
            edges = removal.edges_removed,
            attendance = removal.attendance_removed,
            "user deleted"
        );
        Ok(removal)
    }

    // ── Follow graph ────────────────────────────────────────────────────

    /// Makes `follower` follow `followee`.
    ///
    /// Returns `false` if the edge already existed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] for a self-follow.
    pub async fn follow_user(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<bool, SelectorError> {
        if follower == followee {
            return Err(SelectorError::InvalidRequest(format!(
                "user {follower} cannot follow themselves"
            )));
        }
        let added = self.store.follow(follower.clone(), followee.clone()).await;
        tracing::debug!(%follower, %followee, added, "follow");
        Ok(added)
    }

    /// Removes the edge `follower → followee`. Missing edges are a no-op.
    pub async fn unfollow_user(&self, follower: &UserId, followee: &UserId) -> bool {
        let removed = self.store.unfollow(follower, followee).await;
        tracing::debug!(%follower, %followee, removed, "unfollow");
        removed
    }

    /// Users following `user_id`. Ids without a user record are skipped.
    pub async fn followers_of(&self, user_id: &UserId) -> Vec<User> {
        self.store.follower_users(user_id).await
    }

    /// Users that `user_id` follows. Ids without a user record are skipped.
    pub async fn following_of(&self, user_id: &UserId) -> Vec<User> {
        self.store.followee_users(user_id).await
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Validates and stores a new event, returning its id.
    ///
    /// An explicit id that already exists replaces that event whole.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] if the draft is invalid.
    pub async fn create_event(&self, draft: EventDraft) -> Result<EventId, SelectorError> {
        let event = draft.into_event();
        validate_event(&event)?;
        let event_id = event.id.clone();
        let host_id = event.host_id.clone();
        let visibility = event.visibility.as_str();

        match self.store.upsert_event(event).await {
            UpsertOutcome::Created => {
                tracing::info!(%event_id, %host_id, visibility, "event created");
            }
            UpsertOutcome::Replaced { revision } => {
                tracing::info!(%event_id, %host_id, revision, "event overwritten on create");
            }
        }
        Ok(event_id)
    }

    /// Replaces an existing event whole, returning the new revision.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] if the event is invalid
    /// or [`SelectorError::EventNotFound`] if it does not exist.
    pub async fn update_event(&self, event: Event) -> Result<u64, SelectorError> {
        validate_event(&event)?;
        let event_id = event.id.clone();
        let revision = self.store.replace_event(event).await?;
        tracing::info!(%event_id, revision, "event updated");
        Ok(revision)
    }

    /// Deletes an event and its attendance records.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn delete_event(&self, event_id: &EventId) -> Result<Event, SelectorError> {
        let (event, dropped) = self.store.remove_event(event_id).await?;
        tracing::info!(%event_id, attendance = dropped, "event deleted");
        Ok(event)
    }

    /// Returns the current version of an event.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: &EventId) -> Result<Event, SelectorError> {
        self.store.get_event(event_id).await
    }

    /// Every event in catalog order, without visibility gating.
    pub async fn all_events(&self) -> Vec<Event> {
        self.store.events().await
    }

    /// Summaries of every event in catalog order.
    pub async fn event_summaries(&self) -> Vec<EventSummary> {
        self.store.summaries().await
    }

    /// Events hosted by `user_id`, without visibility gating.
    pub async fn events_hosted_by(&self, user_id: &UserId) -> Vec<Event> {
        self.store
            .events_matching(|event| event.is_hosted_by(user_id))
            .await
    }

    /// Events `user_id` attends, without visibility gating.
    pub async fn events_attended_by(&self, user_id: &UserId) -> Vec<Event> {
        self.store.events_attended_by(user_id).await
    }

    /// Events carrying `tag` (case-insensitive), without visibility gating.
    pub async fn events_by_tag(&self, tag: &str) -> Vec<Event> {
        let filter = PredicateFilter::Tag(tag.to_lowercase());
        self.store.events_matching(|event| filter.matches(event)).await
    }

    // ── Attendance ──────────────────────────────────────────────────────

    /// Marks `user_id` as attending `event_id`. Capacity is not enforced.
    ///
    /// Returns `false` if the user was already attending.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EventNotFound`] if the event does not exist.
    pub async fn attend_event(
        &self,
        user_id: &UserId,
        event_id: &EventId,
    ) -> Result<bool, SelectorError> {
        let added = self.store.attend(event_id, user_id.clone()).await?;
        tracing::debug!(%user_id, %event_id, added, "attend");
        Ok(added)
    }

    /// Removes `user_id` from `event_id`. Returns `false` if they were
    /// not attending.
    pub async fn leave_event(&self, user_id: &UserId, event_id: &EventId) -> bool {
        let removed = self.store.leave(event_id, user_id).await;
        tracing::debug!(%user_id, %event_id, removed, "leave");
        removed
    }

    /// Users attending `event_id`. Ids without a user record are skipped.
    pub async fn event_attendees(&self, event_id: &EventId) -> Vec<User> {
        self.store.attendee_users(event_id).await
    }

    /// Number of users attending `event_id`.
    pub async fn attendee_count(&self, event_id: &EventId) -> usize {
        self.store.attendee_count(event_id).await
    }

    /// Returns `true` if `user_id` attends `event_id`.
    pub async fn is_attending(&self, user_id: &UserId, event_id: &EventId) -> bool {
        self.store.is_attending(event_id, user_id).await
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Events visible to `viewer` that satisfy `criteria`, in catalog
    /// order.
    pub async fn filtered_events(
        &self,
        viewer: &UserId,
        criteria: &[FilterCriterion],
    ) -> Vec<Event> {
        let snapshot = self.store.snapshot().await;
        let catalog_len = snapshot.catalog.len();
        if catalog_len > self.catalog_warn_threshold {
            tracing::warn!(
                catalog = catalog_len,
                threshold = self.catalog_warn_threshold,
                "catalog exceeds selection soft limit"
            );
        }

        let selected: Vec<Event> = snapshot
            .select(viewer, criteria)
            .into_iter()
            .cloned()
            .collect();

        tracing::debug!(
            %viewer,
            criteria = criteria.len(),
            catalog = catalog_len,
            selected = selected.len(),
            "events selected"
        );
        selected
    }

    /// Events selected as by [`EventService::filtered_events`], narrowed
    /// to those whose name, description or a tag contains `query`
    /// (case-insensitive). A blank query leaves the selection unchanged.
    pub async fn search_events(
        &self,
        viewer: &UserId,
        criteria: &[FilterCriterion],
        query: &str,
    ) -> Vec<Event> {
        let selected = self.filtered_events(viewer, criteria).await;
        let before = selected.len();
        let found = search::search_events(selected, query);
        tracing::debug!(%viewer, query, selected = before, found = found.len(), "events searched");
        found
    }

    // ── Seeding ─────────────────────────────────────────────────────────

    /// Loads a seed document: users, then events, then follow edges,
    /// then attendance.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidRequest`] for an invalid user or
    /// event or a self-follow edge, or [`SelectorError::EventNotFound`]
    /// for attendance on an event the seed does not define. Records
    /// loaded before the failure stay in the store.
    pub async fn load_seed(&self, seed: SeedData) -> Result<SeedSummary, SelectorError> {
        let mut summary = SeedSummary::default();

        for user in seed.users {
            validate_user(&user.id, &user.name)?;
            self.store.upsert_user(user).await;
            summary.users += 1;
        }
        for event in seed.events {
            validate_event(&event)?;
            self.store.upsert_event(event).await;
            summary.events += 1;
        }
        for edge in seed.follows {
            if self.follow_user(&edge.follower, &edge.followee).await? {
                summary.follows += 1;
            }
        }
        for record in seed.attendance {
            if self.store.attend(&record.event_id, record.user_id).await? {
                summary.attendance += 1;
            }
        }

        tracing::info!(
            users = summary.users,
            events = summary.events,
            follows = summary.follows,
            attendance = summary.attendance,
            "seed loaded"
        );
        Ok(summary)
    }
}
