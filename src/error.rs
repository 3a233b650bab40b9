//! Error types for the selection adapter.
//!
//! [`SelectorError`] is the central error type of the crate. The engine
//! itself is infallible; every variant here originates in the store,
//! the service layer, seed loading, or configuration. Each variant maps
//! to a stable numeric code so callers can classify failures without
//! matching on message text.

use crate::domain::{EventId, UserId};

/// Crate-wide error enum with stable numeric codes.
///
/// # Error Code Ranges
///
/// | Range     | Category        |
/// |-----------|-----------------|
/// | 1000–1999 | Validation      |
/// | 2000–2999 | Not Found       |
/// | 3000–3999 | I/O             |
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// User with the given ID (or email) was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A JSON document (seed file, criteria list) could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading an input file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SelectorError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Decode(_) => 1002,
            Self::Config(_) => 1003,
            Self::EventNotFound(_) => 2001,
            Self::UserNotFound(_) => 2002,
            Self::Io(_) => 3001,
        }
    }

    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound(_) | Self::UserNotFound(_))
    }
}
