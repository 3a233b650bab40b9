//! Input validation for event records entering the store.
//!
//! The engine accepts anything; this is where malformed records are
//! stopped. Dates and times are checked for their exact zero-padded
//! shape so that the engine's plain string comparison on dates stays
//! equivalent to calendar order for everything stored through here.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::domain::{Event, EventId, UserId, VisibilityClass};
use crate::error::SelectorError;

/// Caller-supplied data for a new event.
///
/// `id` may be omitted, in which case a UUID v4 is generated. Cost and
/// capacity default to zero, matching the behaviour of the event form.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    /// Explicit identifier; generated when absent.
    #[serde(default)]
    pub id: Option<EventId>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Host user.
    pub host_id: UserId,
    /// Free-text address.
    pub address: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub start_time: String,
    /// `HH:MM`.
    pub end_time: String,
    /// Comma-joined tags.
    #[serde(default)]
    pub tags: String,
    /// Estimated cost; zero when absent.
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Advisory capacity; zero when absent.
    #[serde(default)]
    pub max_attendees: Option<u32>,
    /// Audience class.
    #[serde(default)]
    pub visibility: VisibilityClass,
}

impl EventDraft {
    /// Builds the event record, generating an id if none was given.
    #[must_use]
    pub fn into_event(self) -> Event {
        Event {
            id: self.id.unwrap_or_else(EventId::generate),
            name: self.name,
            description: self.description,
            host_id: self.host_id,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            estimated_cost: self.estimated_cost.unwrap_or(0.0),
            max_attendees: self.max_attendees.unwrap_or(0),
            tags: self.tags,
            visibility: self.visibility,
        }
    }
}

/// Checks an event record before it is stored.
///
/// # Errors
///
/// Returns [`SelectorError::InvalidRequest`] naming the first offending
/// field.
pub fn validate_event(event: &Event) -> Result<(), SelectorError> {
    require_non_blank("id", event.id.as_str())?;
    require_non_blank("name", &event.name)?;
    require_non_blank("host_id", event.host_id.as_str())?;
    require_non_blank("address", &event.address)?;

    if !event.latitude.is_finite() || !(-90.0..=90.0).contains(&event.latitude) {
        return Err(invalid(format!("latitude out of range: {}", event.latitude)));
    }
    if !event.longitude.is_finite() || !(-180.0..=180.0).contains(&event.longitude) {
        return Err(invalid(format!("longitude out of range: {}", event.longitude)));
    }

    validate_date(&event.date)?;
    validate_time("start_time", &event.start_time)?;
    validate_time("end_time", &event.end_time)?;

    if !event.estimated_cost.is_finite() || event.estimated_cost < 0.0 {
        return Err(invalid(format!(
            "estimated_cost must be a non-negative amount: {}",
            event.estimated_cost
        )));
    }
    Ok(())
}

/// Checks a display name / identifier pair for a user.
///
/// # Errors
///
/// Returns [`SelectorError::InvalidRequest`] if either is blank.
pub fn validate_user(id: &UserId, name: &str) -> Result<(), SelectorError> {
    require_non_blank("user id", id.as_str())?;
    require_non_blank("user name", name)
}

fn validate_date(date: &str) -> Result<(), SelectorError> {
    if date.len() != 10 || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(invalid(format!("date must be YYYY-MM-DD: {date:?}")));
    }
    Ok(())
}

fn validate_time(field: &str, time: &str) -> Result<(), SelectorError> {
    if time.len() != 5 || NaiveTime::parse_from_str(time, "%H:%M").is_err() {
        return Err(invalid(format!("{field} must be HH:MM: {time:?}")));
    }
    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> Result<(), SelectorError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be blank")));
    }
    Ok(())
}

fn invalid(message: String) -> SelectorError {
    SelectorError::InvalidRequest(message)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            id: None,
            name: "Hiking".to_string(),
            description: "Mountain hiking".to_string(),
            host_id: UserId::from("u1"),
            address: "123 Trail Road".to_string(),
            latitude: 43.4723,
            longitude: -80.5449,
            date: "2025-10-15".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            tags: "hiking,outdoors".to_string(),
            estimated_cost: None,
            max_attendees: None,
            visibility: VisibilityClass::Public,
        }
    }

    fn rejects(event: &Event) -> String {
        let Err(SelectorError::InvalidRequest(msg)) = validate_event(event) else {
            panic!("expected validation failure");
        };
        msg
    }

    #[test]
    fn draft_defaults_and_generated_id() {
        let event = draft().into_event();
        assert_eq!(event.id.as_str().len(), 36);
        assert_eq!(event.estimated_cost, 0.0);
        assert_eq!(event.max_attendees, 0);
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn explicit_id_is_kept() {
        let mut d = draft();
        d.id = Some(EventId::from("e1"));
        assert_eq!(d.into_event().id, EventId::from("e1"));
    }

    #[test]
    fn blank_fields_rejected() {
        let mut event = draft().into_event();
        event.name = "   ".to_string();
        assert!(rejects(&event).contains("name"));

        let mut event = draft().into_event();
        event.address = String::new();
        assert!(rejects(&event).contains("address"));
    }

    #[test]
    fn unpadded_dates_and_times_rejected() {
        let mut event = draft().into_event();
        event.date = "2025-9-1".to_string();
        assert!(rejects(&event).contains("date"));

        let mut event = draft().into_event();
        event.date = "2025-02-30".to_string();
        assert!(rejects(&event).contains("date"));

        let mut event = draft().into_event();
        event.start_time = "9:00".to_string();
        assert!(rejects(&event).contains("start_time"));

        let mut event = draft().into_event();
        event.end_time = "25:00".to_string();
        assert!(rejects(&event).contains("end_time"));
    }

    #[test]
    fn coordinates_and_cost_checked() {
        let mut event = draft().into_event();
        event.latitude = 91.0;
        assert!(rejects(&event).contains("latitude"));

        let mut event = draft().into_event();
        event.longitude = f64::NAN;
        assert!(rejects(&event).contains("longitude"));

        let mut event = draft().into_event();
        event.estimated_cost = -1.0;
        assert!(rejects(&event).contains("estimated_cost"));
    }

    #[test]
    fn user_validation() {
        assert!(validate_user(&UserId::from("u1"), "Alice").is_ok());
        assert!(validate_user(&UserId::from(""), "Alice").is_err());
        assert!(validate_user(&UserId::from("u1"), " ").is_err());
    }
}
