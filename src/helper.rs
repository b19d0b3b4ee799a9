use chrono::NaiveDate;
use log::debug;

use crate::{Event, Result, SchedulerError};

/// True when `query` occurs, ignoring case, in the name, description or type.
/// `query` must already be lowercase.
fn matches_query(event: &Event, query: &str) -> bool {
    [
        Some(event.name.as_str()),
        event.description.as_deref(),
        event.kind.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(query))
}

/// Keeps the events matching `query`. An empty query matches nothing.
pub fn filter_events(events: Vec<Event>, query: &str) -> Vec<Event> {
    if query.is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    let matched: Vec<Event> = events
        .into_iter()
        .filter(|event| matches_query(event, &query))
        .collect();

    debug!("Filter '{}' matched {} events", query, matched.len());
    matched
}

// Helper method for parsing dates given on the command line
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SchedulerError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventFields;

    fn event(id: &str, name: &str, description: Option<&str>, kind: Option<&str>) -> Event {
        let mut fields = EventFields::new(name, "09:00".parse().unwrap(), "10:00".parse().unwrap());
        fields.description = description.map(str::to_string);
        fields.kind = kind.map(str::to_string);
        Event::from_fields(id.to_string(), "2024-05-06".parse().unwrap(), fields)
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn matches_any_text_field_case_insensitively() {
        let events = vec![
            event("1", "Gym session", None, None),
            event("2", "Call", Some("Ask about the GYM pass"), None),
            event("3", "Run", None, Some("gym")),
            event("4", "Lunch", Some("noodles"), Some("food")),
        ];
        assert_eq!(ids(&filter_events(events, "Gym")), vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_query_returns_nothing() {
        let events = vec![event("1", "Anything", None, None)];
        assert!(filter_events(events, "").is_empty());
    }

    #[test]
    fn whitespace_query_is_a_literal_substring() {
        let events = vec![
            event("1", "Team sync", None, None),
            event("2", "Solo", None, None),
        ];
        assert_eq!(ids(&filter_events(events, " ")), vec!["1"]);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(SchedulerError::InvalidDate { .. })
        ));
        assert!(parse_date("05/06/2024").is_err());
    }
}
