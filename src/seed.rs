//! JSON seed documents for populating the in-memory store.
//!
//! A seed is the whole record set in one document:
//!
//! ```json
//! {
//!   "users":      [{ "id": "u1", "name": "Alice" }],
//!   "events":     [{ "id": "e1", "name": "Hike", "host_id": "u1", ... }],
//!   "follows":    [{ "follower": "u2", "followee": "u1" }],
//!   "attendance": [{ "event_id": "e1", "user_id": "u2" }]
//! }
//! ```
//!
//! Every list is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceRecord, Event, FollowEdge, User};
use crate::error::SelectorError;

/// Complete record set to load into a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// User records.
    #[serde(default)]
    pub users: Vec<User>,
    /// Event records, in catalog order.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Follow edges.
    #[serde(default)]
    pub follows: Vec<FollowEdge>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl SeedData {
    /// Decodes a seed document.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Decode`] if the document is not a valid
    /// seed.
    pub fn from_json(json: &str) -> Result<Self, SelectorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and decodes a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Io`] if the file cannot be read and
    /// [`SelectorError::Decode`] if its contents are not a valid seed.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectorError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_json(&raw)
    }
}

/// Counts of records actually added by a seed load.
///
/// Duplicate follow edges and attendance records in the seed are
/// counted once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Users inserted or overwritten.
    pub users: usize,
    /// Events inserted or replaced.
    pub events: usize,
    /// New follow edges.
    pub follows: usize,
    /// New attendance records.
    pub attendance: usize,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_valid() {
        let Ok(seed) = SeedData::from_json("{}") else {
            panic!("empty seed should decode");
        };
        assert!(seed.users.is_empty());
        assert!(seed.events.is_empty());
    }

    #[test]
    fn decodes_all_sections() {
        let json = r#"{
            "users": [{"id": "u1", "name": "Alice", "email": "alice@example.com"}],
            "events": [{
                "id": "e1", "name": "Hike", "host_id": "u1", "address": "Trail",
                "latitude": 43.47, "longitude": -80.54, "date": "2025-10-15",
                "start_time": "09:00", "end_time": "17:00", "visibility": "friend_only"
            }],
            "follows": [{"follower": "u2", "followee": "u1"}],
            "attendance": [{"event_id": "e1", "user_id": "u2"}]
        }"#;
        let Ok(seed) = SeedData::from_json(json) else {
            panic!("seed should decode");
        };
        assert_eq!(seed.users.len(), 1);
        assert_eq!(seed.events.len(), 1);
        assert_eq!(seed.follows, vec![FollowEdge::new("u2", "u1")]);
        assert_eq!(seed.attendance, vec![AttendanceRecord::new("e1", "u2")]);
    }

    #[test]
    fn malformed_document_is_decode_error() {
        let Err(err) = SeedData::from_json(r#"{"users": 3}"#) else {
            panic!("expected decode failure");
        };
        assert!(matches!(err, SelectorError::Decode(_)));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let Err(err) = SeedData::from_path("/definitely/not/here.json").await else {
            panic!("expected io failure");
        };
        assert!(matches!(err, SelectorError::Io(_)));
    }
}
