//! Event records and visibility classes.

use serde::{Deserialize, Serialize};

use super::{EventId, UserId};

/// Audience an event is published to.
///
/// The host always sees their own event regardless of class; see
/// [`crate::engine::visibility`] for the full decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityClass {
    /// Visible to every viewer.
    #[default]
    Public,
    /// Visible to viewers who follow the host.
    FollowerOnly,
    /// Visible only when viewer and host follow each other.
    FriendOnly,
}

impl VisibilityClass {
    /// Returns the class as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::FollowerOnly => "follower_only",
            Self::FriendOnly => "friend_only",
        }
    }
}

/// A single event in the catalog.
///
/// Events are immutable per version: the adapter replaces them whole and
/// the engine only ever reads them. `date` is an ISO `YYYY-MM-DD` string
/// and is compared lexicographically; `start_time` / `end_time` are
/// `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event key.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Owner of the event (a lookup key, not an owned user).
    pub host_id: UserId,
    /// Free-text address.
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// End time, `HH:MM`.
    pub end_time: String,
    /// Estimated cost to attend, in the caller's currency.
    #[serde(default)]
    pub estimated_cost: f64,
    /// Advisory capacity. Attendance is never refused once it is reached.
    #[serde(default)]
    pub max_attendees: u32,
    /// Comma-joined, case-insensitive labels (e.g. `"hiking, outdoors"`).
    #[serde(default)]
    pub tags: String,
    /// Audience class.
    #[serde(default)]
    pub visibility: VisibilityClass,
}

impl Event {
    /// Iterates over the event's tags, trimmed and lower-cased.
    ///
    /// Empty segments (e.g. from a trailing comma) are yielded as empty
    /// strings, mirroring a plain split.
    pub fn normalized_tags(&self) -> impl Iterator<Item = String> + '_ {
        self.tags.split(',').map(|t| t.trim().to_lowercase())
    }

    /// Returns `true` if `user` is the host of this event.
    #[must_use]
    pub fn is_hosted_by(&self, user: &UserId) -> bool {
        &self.host_id == user
    }
}
