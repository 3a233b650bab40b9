//! # meetup-selector
//!
//! Event selection engine for a social-events service.
//!
//! Given a catalog of events, a follow graph, attendance records, a
//! viewer, and a list of filter criteria, the engine returns the events
//! the viewer may see that also satisfy the criteria, in catalog order.
//! Identity filters (hosted by, attending) are OR-combined into the base
//! set; every other filter is AND-combined on top.
//!
//! ## Architecture
//!
//! ```text
//! Binary (main.rs) ── SelectorConfig (config.rs), SeedData (seed.rs)
//!     │
//!     ├── EventService (service/)
//!     │
//!     ├── EventStore ──snapshot──▶ Snapshot (domain/)
//!     │
//!     └── EventSelector (engine/)
//!           ├── VisibilityPolicy over SocialGraph
//!           └── FilterCriterion ▶ identity / predicate filters
//! ```
//!
//! The engine is pure and synchronous; locking lives in the store.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod seed;
pub mod service;
