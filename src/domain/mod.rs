//! Domain layer: records, identifiers, and the in-memory store.
//!
//! This module contains the data model shared by the engine and the
//! adapter: user and event identity, event records with their
//! visibility class, follow edges, attendance records, the store that
//! holds them, and the snapshot type the store hands to the engine.

pub mod attendance;
pub mod event;
pub mod event_entry;
pub mod event_store;
pub mod follow;
pub mod ids;
pub mod snapshot;
pub mod user;

pub use attendance::{AttendanceRecord, AttendanceSet};
pub use event::{Event, VisibilityClass};
pub use event_entry::{EventEntry, EventSummary, UpsertOutcome};
pub use event_store::{EventStore, UserRemoval};
pub use follow::FollowEdge;
pub use ids::{EventId, UserId};
pub use snapshot::Snapshot;
pub use user::User;
