//! Core data structures for the dayplan application.
//!
//! The field names serialized here are the on-disk format; keep them stable.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{TimeOfDay, TimeSlot};

/// Represents a single scheduled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Event label
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Day the event belongs to, assigned at creation
    pub date: NaiveDate,
    /// Free-text classification, only used when filtering
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// The editable fields of an event, as submitted by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub description: Option<String>,
    pub kind: Option<String>,
}

impl EventFields {
    pub fn new(name: impl Into<String>, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time,
            description: None,
            kind: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }

    /// Trims the name and drops blank optional text.
    pub(crate) fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            kind: non_blank(self.kind),
            ..self
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Event {
    /// Creates a new event on `date` from submitted fields
    pub fn from_fields(id: String, date: NaiveDate, fields: EventFields) -> Self {
        Event {
            id,
            name: fields.name,
            start_time: fields.start_time,
            end_time: fields.end_time,
            description: fields.description,
            date,
            kind: fields.kind,
        }
    }

    /// Replaces every editable field. `id` and `date` never change.
    pub fn apply_fields(&mut self, fields: EventFields) {
        self.name = fields.name;
        self.start_time = fields.start_time;
        self.end_time = fields.end_time;
        self.description = fields.description;
        self.kind = fields.kind;
    }

    /// The current field values, e.g. to prefill an edit form.
    pub fn fields(&self) -> EventFields {
        EventFields {
            name: self.name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }
}

/// Generates a fresh event id. Ids are random v4 UUIDs, so an id is never
/// handed out twice, including ids of deleted events.
pub fn next_event_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: "1700000000000".to_string(),
            name: "Standup".to_string(),
            start_time: "09:00".parse().unwrap(),
            end_time: "09:15".parse().unwrap(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            kind: Some("work".to_string()),
        }
    }

    #[test]
    fn serializes_with_stored_key_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["endTime"], "09:15");
        assert_eq!(value["date"], "2024-05-06");
        assert_eq!(value["type"], "work");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn deserializes_records_without_optional_fields() {
        let raw = r#"{"id":"1","name":"Lunch","startTime":"12:00","endTime":"13:00","date":"2024-05-06"}"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        assert_eq!(event.name, "Lunch");
        assert_eq!(event.description, None);
        assert_eq!(event.kind, None);
    }

    #[test]
    fn apply_fields_keeps_identity() {
        let mut event = sample();
        let fields = EventFields::new("Retro", "15:00".parse().unwrap(), "16:00".parse().unwrap())
            .with_description("sprint 12");
        event.apply_fields(fields);

        assert_eq!(event.id, "1700000000000");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(event.name, "Retro");
        assert_eq!(event.description.as_deref(), Some("sprint 12"));
        assert_eq!(event.kind, None);
    }

    #[test]
    fn normalized_drops_blank_text() {
        let fields = EventFields::new("  Gym ", "07:00".parse().unwrap(), "08:00".parse().unwrap())
            .with_description("   ")
            .with_kind("health");
        let fields = fields.normalized();
        assert_eq!(fields.name, "Gym");
        assert_eq!(fields.description, None);
        assert_eq!(fields.kind.as_deref(), Some("health"));
    }

    #[test]
    fn next_id_is_fresh_every_time() {
        let mut ids: Vec<_> = (0..1000).map(|_| next_event_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 1000);
    }
}
