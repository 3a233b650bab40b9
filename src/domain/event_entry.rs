//! Stored event combined with store-side metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Event, EventId, UserId, VisibilityClass};

/// An [`Event`] as held by the store.
///
/// `event` is replaced whole on every update; the remaining fields track
/// when the record was created and how many versions it has had.
#[derive(Debug, Clone)]
pub struct EventEntry {
    /// Current version of the event.
    pub event: Event,

    /// Insertion sequence number; defines catalog order.
    pub seq: u64,

    /// Version counter, starting at 1 and bumped on every replacement.
    pub revision: u64,

    /// Creation timestamp (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last replacement.
    pub last_modified_at: DateTime<Utc>,
}

impl EventEntry {
    /// Creates a first-revision entry.
    #[must_use]
    pub fn new(event: Event, seq: u64) -> Self {
        let now = Utc::now();
        Self {
            event,
            seq,
            revision: 1,
            created_at: now,
            last_modified_at: now,
        }
    }

    /// Replaces the stored event, keeping creation order and timestamp.
    pub fn replace(&mut self, event: Event) {
        self.event = event;
        self.revision = self.revision.saturating_add(1);
        self.last_modified_at = Utc::now();
    }
}

/// Result of an insert-or-replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No event with that id existed.
    Created,
    /// An existing event was replaced.
    Replaced {
        /// Revision number after the replacement.
        revision: u64,
    },
}

/// Lightweight view of a stored event for listings.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    /// Event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Host identifier.
    pub host_id: UserId,
    /// Event date.
    pub date: String,
    /// Audience class.
    pub visibility: VisibilityClass,
    /// Current revision.
    pub revision: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last replacement timestamp.
    pub last_modified_at: DateTime<Utc>,
}

impl From<&EventEntry> for EventSummary {
    fn from(entry: &EventEntry) -> Self {
        Self {
            id: entry.event.id.clone(),
            name: entry.event.name.clone(),
            host_id: entry.event.host_id.clone(),
            date: entry.event.date.clone(),
            visibility: entry.event.visibility,
            revision: entry.revision,
            created_at: entry.created_at,
            last_modified_at: entry.last_modified_at,
        }
    }
}
