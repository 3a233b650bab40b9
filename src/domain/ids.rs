//! Type-safe user and event identifiers.
//!
//! [`UserId`] and [`EventId`] are newtype wrappers around opaque string
//! tokens so that a host reference can never be passed where an event
//! key is expected. The engine performs no validation on either: any
//! string is a valid identifier, including ones that appear nowhere in
//! the social graph.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a user (viewer, host, follower, attendee).
///
/// Serialized transparently as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique key of an event in the catalog.
///
/// Generated once at creation time (UUID v4 when the caller supplies
/// none) and immutable thereafter. Replacing an event keeps its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random identifier (UUID v4, hyphenated).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id_impls!(UserId);
string_id_impls!(EventId);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_unique_ids() {
        let a = EventId::generate();
        let b = EventId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36); // UUID string length
    }

    #[test]
    fn display_is_raw_token() {
        let id = UserId::from("u1");
        assert_eq!(format!("{id}"), "u1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = EventId::from("e7");
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"e7\"");

        let Ok(back) = serde_json::from_str::<EventId>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(back, id);
    }

    #[test]
    fn borrow_allows_str_lookups() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(UserId::from("u1"));
        assert!(set.contains("u1"));
        assert!(!set.contains("u2"));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(UserId::from("alice") < UserId::from("bob"));
    }
}
