//! Event selection engine.
//!
//! A pure, synchronous computation over a snapshot of events, follow
//! edges and attendance records. Nothing in this module performs I/O,
//! takes a lock, or mutates its inputs; identical inputs always yield
//! identical output.
//!
//! ```text
//! EventSelector
//!     ├── PartitionedCriteria (filter)
//!     │       ├── IdentityFilter   (OR → base set)
//!     │       └── PredicateFilter  (AND) ── geo::distance_km
//!     └── VisibilityPolicy ── SocialGraph
//!
//! search::KeywordQuery   (applied to a selection's output)
//! ```

pub mod filter;
pub mod geo;
pub mod search;
pub mod selector;
pub mod social_graph;
pub mod visibility;

pub use filter::{FilterCriterion, IdentityFilter, PartitionedCriteria, PredicateFilter};
pub use geo::distance_km;
pub use search::{KeywordQuery, search_events, search_users};
pub use selector::{EventSelector, select};
pub use social_graph::SocialGraph;
pub use visibility::{Visibility, VisibilityPolicy};
