//! Free-text keyword search over events and users.
//!
//! Search is a refinement applied after selection, not a filter
//! criterion: it never widens a result and never bypasses visibility.

use crate::domain::{Event, User};

/// A normalized, non-blank search keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    needle: String,
}

impl KeywordQuery {
    /// Normalizes `query` (trimmed, lower-cased).
    ///
    /// Returns `None` for a blank query, which matches everything.
    #[must_use]
    pub fn parse(query: &str) -> Option<Self> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Some(Self { needle })
    }

    /// The normalized keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Substring match on the event's name, description, or any tag.
    #[must_use]
    pub fn matches_event(&self, event: &Event) -> bool {
        event.name.to_lowercase().contains(&self.needle)
            || event.description.to_lowercase().contains(&self.needle)
            || event.normalized_tags().any(|tag| tag.contains(&self.needle))
    }

    /// Substring match on the user's id or name.
    #[must_use]
    pub fn matches_user(&self, user: &User) -> bool {
        user.id.as_str().to_lowercase().contains(&self.needle)
            || user.name.to_lowercase().contains(&self.needle)
    }
}

/// Keeps the events matching `query`, preserving order. A blank query
/// keeps everything.
#[must_use]
pub fn search_events(events: Vec<Event>, query: &str) -> Vec<Event> {
    match KeywordQuery::parse(query) {
        Some(keyword) => events
            .into_iter()
            .filter(|event| keyword.matches_event(event))
            .collect(),
        None => events,
    }
}

/// Keeps the users matching `query`, preserving order. A blank query
/// keeps everything.
#[must_use]
pub fn search_users(users: Vec<User>, query: &str) -> Vec<User> {
    match KeywordQuery::parse(query) {
        Some(keyword) => users
            .into_iter()
            .filter(|user| keyword.matches_user(user))
            .collect(),
        None => users,
    }
}
