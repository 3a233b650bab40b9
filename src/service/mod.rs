//! Service layer: business logic orchestration.
//!
//! [`EventService`] validates record mutations before they reach the
//! [`super::domain::EventStore`] and runs selections against store
//! snapshots.

pub mod event_service;
pub mod validation;

pub use event_service::EventService;
pub use validation::{EventDraft, validate_event, validate_user};
