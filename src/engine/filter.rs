//! Filter criteria and their evaluation.
//!
//! [`FilterCriterion`] is the closed set of filters a caller may ask
//! for. Before evaluation every criterion is classified into either an
//! [`IdentityFilter`], which widens the base candidate set (OR), or a
//! [`PredicateFilter`], which every surviving event must pass (AND).
//! Both classification and evaluation are exhaustive matches, so adding
//! a filter kind does not compile until every site handles it.
//!
//! On the wire criteria are internally tagged by `kind`:
//!
//! ```json
//! [
//!   { "kind": "by_location", "latitude": 43.47, "longitude": -80.54, "radius_km": 10.0 },
//!   { "kind": "by_tag", "tag": "hiking" },
//!   { "kind": "attending", "user_id": "u1" }
//! ]
//! ```
//!
//! An unknown `kind` fails to decode; it is never silently ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceSet, Event, UserId};

use super::geo;

/// A single declarative filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterCriterion {
    /// Events within `radius_km` of the given point.
    ByLocation {
        /// Reference latitude in degrees.
        latitude: f64,
        /// Reference longitude in degrees.
        longitude: f64,
        /// Inclusive radius in kilometres.
        radius_km: f64,
    },
    /// Events carrying `tag` (case-insensitive).
    ByTag {
        /// Tag to look for.
        tag: String,
    },
    /// Events whose address contains `query` (case-insensitive).
    ByAddress {
        /// Substring to look for.
        query: String,
    },
    /// Events dated within `[start_date, end_date]`, compared as strings.
    ByDateRange {
        /// Inclusive lower bound, `YYYY-MM-DD`.
        start_date: String,
        /// Inclusive upper bound, `YYYY-MM-DD`.
        end_date: String,
    },
    /// Events whose capacity is at most `max_attendees`.
    ByMaxAttendees {
        /// Inclusive capacity ceiling. Negative values match nothing.
        max_attendees: i64,
    },
    /// Events costing at most `max_cost`.
    ByCost {
        /// Inclusive cost ceiling.
        max_cost: f64,
    },
    /// Identity filter: events hosted by `user_id`.
    ByHostedBy {
        /// Host to match.
        user_id: UserId,
    },
    /// Identity filter: events `user_id` is attending.
    Attending {
        /// Attendee to match.
        user_id: UserId,
    },
}

impl FilterCriterion {
    /// Location filter around (`latitude`, `longitude`).
    #[must_use]
    pub const fn location(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self::ByLocation {
            latitude,
            longitude,
            radius_km,
        }
    }

    /// Tag filter.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::ByTag { tag: tag.into() }
    }

    /// Address substring filter.
    #[must_use]
    pub fn address(query: impl Into<String>) -> Self {
        Self::ByAddress {
            query: query.into(),
        }
    }

    /// Inclusive date-range filter.
    #[must_use]
    pub fn date_range(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self::ByDateRange {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Capacity ceiling filter.
    #[must_use]
    pub const fn max_attendees(max_attendees: i64) -> Self {
        Self::ByMaxAttendees { max_attendees }
    }

    /// Cost ceiling filter.
    #[must_use]
    pub const fn cost(max_cost: f64) -> Self {
        Self::ByCost { max_cost }
    }

    /// Hosted-by identity filter.
    #[must_use]
    pub fn hosted_by(user_id: impl Into<UserId>) -> Self {
        Self::ByHostedBy {
            user_id: user_id.into(),
        }
    }

    /// Attending identity filter.
    #[must_use]
    pub fn attending(user_id: impl Into<UserId>) -> Self {
        Self::Attending {
            user_id: user_id.into(),
        }
    }

    /// Returns `true` for the two identity filters.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::ByHostedBy { .. } | Self::Attending { .. })
    }

    /// Returns the criterion kind as a static string slice.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::ByLocation { .. } => "by_location",
            Self::ByTag { .. } => "by_tag",
            Self::ByAddress { .. } => "by_address",
            Self::ByDateRange { .. } => "by_date_range",
            Self::ByMaxAttendees { .. } => "by_max_attendees",
            Self::ByCost { .. } => "by_cost",
            Self::ByHostedBy { .. } => "by_hosted_by",
            Self::Attending { .. } => "attending",
        }
    }

    /// Splits this criterion into its evaluation form.
    ///
    /// Tag and address needles are lower-cased once here rather than on
    /// every event.
    #[must_use]
    pub fn classify(&self) -> Classified<'_> {
        match self {
            Self::ByHostedBy { user_id } => Classified::Identity(IdentityFilter::HostedBy(user_id)),
            Self::Attending { user_id } => Classified::Identity(IdentityFilter::Attending(user_id)),
            Self::ByLocation {
                latitude,
                longitude,
                radius_km,
            } => Classified::Predicate(PredicateFilter::Location {
                latitude: *latitude,
                longitude: *longitude,
                radius_km: *radius_km,
            }),
            Self::ByTag { tag } => Classified::Predicate(PredicateFilter::Tag(tag.to_lowercase())),
            Self::ByAddress { query } => {
                Classified::Predicate(PredicateFilter::Address(query.to_lowercase()))
            }
            Self::ByDateRange {
                start_date,
                end_date,
            } => Classified::Predicate(PredicateFilter::DateRange {
                start: start_date,
                end: end_date,
            }),
            Self::ByMaxAttendees { max_attendees } => {
                Classified::Predicate(PredicateFilter::MaxAttendees(*max_attendees))
            }
            Self::ByCost { max_cost } => Classified::Predicate(PredicateFilter::Cost(*max_cost)),
        }
    }
}

/// A criterion after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<'a> {
    /// Widens the base candidate set.
    Identity(IdentityFilter<'a>),
    /// Gates individual candidates.
    Predicate(PredicateFilter<'a>),
}

/// Filters that select the base candidate set. Combined with OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFilter<'a> {
    /// Events hosted by this user.
    HostedBy(&'a UserId),
    /// Events this user is attending.
    Attending(&'a UserId),
}

impl IdentityFilter<'_> {
    /// Returns `true` if `event` belongs to this filter's base set.
    #[must_use]
    pub fn admits(&self, event: &Event, attendance: &AttendanceSet) -> bool {
        match self {
            Self::HostedBy(user) => event.is_hosted_by(user),
            Self::Attending(user) => attendance.contains(&event.id, user),
        }
    }
}

/// Filters every candidate must pass. Combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateFilter<'a> {
    /// Within `radius_km` of a point.
    Location {
        /// Reference latitude in degrees.
        latitude: f64,
        /// Reference longitude in degrees.
        longitude: f64,
        /// Inclusive radius in kilometres.
        radius_km: f64,
    },
    /// Lower-cased tag.
    Tag(String),
    /// Lower-cased address needle.
    Address(String),
    /// Inclusive string range on the event date.
    DateRange {
        /// Lower bound.
        start: &'a str,
        /// Upper bound.
        end: &'a str,
    },
    /// Capacity ceiling.
    MaxAttendees(i64),
    /// Cost ceiling.
    Cost(f64),
}

impl PredicateFilter<'_> {
    /// Evaluates the predicate against one event.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::Location {
                latitude,
                longitude,
                radius_km,
            } => {
                geo::distance_km(*latitude, *longitude, event.latitude, event.longitude)
                    <= *radius_km
            }
            Self::Tag(tag) => event.normalized_tags().any(|t| t == *tag),
            Self::Address(needle) => event.address.to_lowercase().contains(needle.as_str()),
            // Plain string order: only meaningful for zero-padded ISO dates.
            Self::DateRange { start, end } => {
                *start <= event.date.as_str() && event.date.as_str() <= *end
            }
            Self::MaxAttendees(max) => i64::from(event.max_attendees) <= *max,
            Self::Cost(max) => event.estimated_cost <= *max,
        }
    }
}

/// Criteria split by role, borrowing from the caller's list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedCriteria<'a> {
    /// Identity filters, in input order.
    pub identity: Vec<IdentityFilter<'a>>,
    /// Predicate filters, in input order.
    pub predicates: Vec<PredicateFilter<'a>>,
}

impl<'a> PartitionedCriteria<'a> {
    /// Classifies every criterion.
    #[must_use]
    pub fn partition(criteria: &'a [FilterCriterion]) -> Self {
        let mut out = Self::default();
        for criterion in criteria {
            match criterion.classify() {
                Classified::Identity(f) => out.identity.push(f),
                Classified::Predicate(f) => out.predicates.push(f),
            }
        }
        out
    }

    /// Returns `true` if `event` passes every predicate filter.
    #[must_use]
    pub fn passes_all(&self, event: &Event) -> bool {
        self.predicates.iter().all(|p| p.matches(event))
    }

    /// Returns `true` if `event` is admitted by any identity filter.
    #[must_use]
    pub fn admitted_by_any(&self, event: &Event, attendance: &AttendanceSet) -> bool {
        self.identity.iter().any(|f| f.admits(event, attendance))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventId, VisibilityClass};

    fn event() -> Event {
        Event {
            id: EventId::from("e1"),
            name: "Hiking".to_string(),
            description: String::new(),
            host_id: UserId::from("u1"),
            address: "123 Trail Road, Waterloo".to_string(),
            latitude: 43.4723,
            longitude: -80.5449,
            date: "2025-10-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            estimated_cost: 20.0,
            max_attendees: 10,
            tags: "hiking, Outdoors".to_string(),
            visibility: VisibilityClass::Public,
        }
    }

    fn matches(criterion: &FilterCriterion, event: &Event) -> bool {
        match criterion.classify() {
            Classified::Predicate(p) => p.matches(event),
            Classified::Identity(_) => panic!("expected a predicate filter"),
        }
    }

    #[test]
    fn location_is_inclusive_radius() {
        let e = event();
        assert!(matches(&FilterCriterion::location(43.4723, -80.5449, 0.0), &e));
        assert!(matches(&FilterCriterion::location(43.4813, -80.5449, 1.1), &e));
        assert!(!matches(&FilterCriterion::location(43.4813, -80.5449, 0.9), &e));
    }

    #[test]
    fn negative_radius_matches_nothing() {
        assert!(!matches(&FilterCriterion::location(43.4723, -80.5449, -1.0), &event()));
    }

    #[test]
    fn tag_is_case_insensitive_and_trimmed_on_event_side() {
        let e = event();
        assert!(matches(&FilterCriterion::tag("HIKING"), &e));
        assert!(matches(&FilterCriterion::tag("outdoors"), &e));
        assert!(!matches(&FilterCriterion::tag("hike"), &e));
        // The needle itself is not trimmed.
        assert!(!matches(&FilterCriterion::tag(" hiking"), &e));
    }

    #[test]
    fn address_is_case_insensitive_substring() {
        let e = event();
        assert!(matches(&FilterCriterion::address("trail road"), &e));
        assert!(matches(&FilterCriterion::address("WATERLOO"), &e));
        assert!(matches(&FilterCriterion::address(""), &e));
        assert!(!matches(&FilterCriterion::address("Toronto"), &e));
    }

    #[test]
    fn date_range_is_inclusive() {
        let e = event();
        assert!(matches(&FilterCriterion::date_range("2025-10-15", "2025-10-15"), &e));
        assert!(matches(&FilterCriterion::date_range("2025-10-01", "2025-10-31"), &e));
        assert!(!matches(&FilterCriterion::date_range("2025-10-16", "2025-10-31"), &e));
    }

    #[test]
    fn date_range_compares_strings_not_dates() {
        // "2025-9-01" sorts after "2025-10-15", so an unpadded bound
        // produces an empty window rather than an error.
        assert!(!matches(&FilterCriterion::date_range("2025-9-01", "2025-12-31"), &event()));
    }

    #[test]
    fn max_attendees_and_cost_are_ceilings() {
        let e = event();
        assert!(matches(&FilterCriterion::max_attendees(10), &e));
        assert!(!matches(&FilterCriterion::max_attendees(9), &e));
        assert!(!matches(&FilterCriterion::max_attendees(-1), &e));
        assert!(matches(&FilterCriterion::cost(20.0), &e));
        assert!(!matches(&FilterCriterion::cost(19.99), &e));
    }

    #[test]
    fn identity_filters_admit_by_host_or_attendance() {
        let e = event();
        let attendance: AttendanceSet = [crate::domain::AttendanceRecord::new("e1", "u2")]
            .into_iter()
            .collect();

        let hosted = FilterCriterion::hosted_by("u1");
        let Classified::Identity(hosted) = hosted.classify() else {
            panic!("hosted_by must be an identity filter");
        };
        assert!(hosted.admits(&e, &attendance));

        let attending = FilterCriterion::attending("u2");
        let Classified::Identity(attending) = attending.classify() else {
            panic!("attending must be an identity filter");
        };
        assert!(attending.admits(&e, &attendance));

        let other = FilterCriterion::attending("u3");
        let Classified::Identity(other) = other.classify() else {
            panic!("attending must be an identity filter");
        };
        assert!(!other.admits(&e, &attendance));
    }

    #[test]
    fn partition_keeps_input_order_per_role() {
        let criteria = vec![
            FilterCriterion::tag("a"),
            FilterCriterion::hosted_by("u1"),
            FilterCriterion::cost(5.0),
            FilterCriterion::attending("u1"),
        ];
        let parts = PartitionedCriteria::partition(&criteria);
        assert_eq!(parts.identity.len(), 2);
        assert_eq!(parts.predicates.len(), 2);
        assert_eq!(parts.predicates.first(), Some(&PredicateFilter::Tag("a".to_string())));
        assert!(criteria.iter().filter(|c| c.is_identity()).count() == 2);
    }

    #[test]
    fn decodes_tagged_json() {
        let json = r#"[
            {"kind": "by_location", "latitude": 1.0, "longitude": 2.0, "radius_km": 3.0},
            {"kind": "by_date_range", "start_date": "2025-01-01", "end_date": "2025-12-31"},
            {"kind": "attending", "user_id": "u9"}
        ]"#;
        let Ok(criteria) = serde_json::from_str::<Vec<FilterCriterion>>(json) else {
            panic!("decode failed");
        };
        assert_eq!(
            criteria,
            vec![
                FilterCriterion::location(1.0, 2.0, 3.0),
                FilterCriterion::date_range("2025-01-01", "2025-12-31"),
                FilterCriterion::attending("u9"),
            ]
        );
        assert_eq!(criteria.get(2).map(FilterCriterion::kind_str), Some("attending"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"[{"kind": "by_weather", "sunny": true}]"#;
        assert!(serde_json::from_str::<Vec<FilterCriterion>>(json).is_err());
    }
}
