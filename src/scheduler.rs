//! Create, edit and delete events for one selected day.
//!
//! Every mutation loads the full collection from the store, applies the
//! change, saves it back, and re-derives the day view from what was saved.
//! The day view is never patched in place.
use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::{
    filter_events, next_event_id, DayChange, Event, EventFields, EventStore, Result,
    SchedulerError, TimeSlot, ValidationError,
};

/// Checks `slot` against `day_events`, skipping the event with id `exclude`.
///
/// Returns the first conflicting event as an error.
pub fn check_slot(
    slot: TimeSlot,
    day_events: &[Event],
    exclude: Option<&str>,
) -> std::result::Result<(), ValidationError> {
    if !slot.is_valid() {
        return Err(ValidationError::InvalidDuration {
            start: slot.start,
            end: slot.end,
        });
    }

    let conflict = day_events
        .iter()
        .filter(|event| Some(event.id.as_str()) != exclude)
        .find(|event| event.slot().overlaps(&slot));

    match conflict {
        Some(event) => Err(ValidationError::OverlapConflict {
            id: event.id.clone(),
            name: event.name.clone(),
            start: event.start_time,
            end: event.end_time,
        }),
        None => Ok(()),
    }
}

/// Orchestrates event changes for a selected day over an injected store.
pub struct EventScheduler<S: EventStore> {
    store: S,
    selected_date: NaiveDate,
    day_events: Vec<Event>,
    editing: Option<String>,
}

impl<S: EventStore> EventScheduler<S> {
    /// Creates a scheduler showing `date`.
    pub fn new(store: S, date: NaiveDate) -> Self {
        let day_events = store.load_for_date(date);
        debug!("Scheduler opened on {} with {} events", date, day_events.len());
        Self {
            store,
            selected_date: date,
            day_events,
            editing: None,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Events of the selected day, in storage order.
    pub fn day_events(&self) -> &[Event] {
        &self.day_events
    }

    /// Id of the event being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switches to `date` and reloads its events from the store.
    ///
    /// Any pending edit is dropped, since it belongs to the previous day.
    pub fn select_day(&mut self, date: NaiveDate) -> &[Event] {
        if let Some(id) = self.editing.take() {
            debug!("Dropping edit of {} on day change", id);
        }
        self.selected_date = date;
        self.day_events = self.store.load_for_date(date);
        debug!("Selected {} ({} events)", date, self.day_events.len());
        &self.day_events
    }

    /// Marks an event of the selected day as the one being edited.
    pub fn begin_edit(&mut self, id: &str) -> Result<&Event> {
        let event = self
            .day_events
            .iter()
            .find(|event| event.id == id)
            .ok_or_else(|| SchedulerError::EventNotFound { id: id.to_string() })?;
        self.editing = Some(event.id.clone());
        Ok(event)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validates and applies a create or, while editing, an update.
    ///
    /// On any error the store, the day view and the edit reference are left
    /// as they were, so the caller can correct the fields and resubmit.
    pub fn submit(&mut self, fields: EventFields) -> Result<DayChange> {
        let fields = fields.normalized();
        if fields.name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }

        let mut global = self.store.load_all();
        let day: Vec<Event> = global
            .iter()
            .filter(|event| event.date == self.selected_date)
            .cloned()
            .collect();

        if let Err(e) = check_slot(fields.slot(), &day, self.editing.as_deref()) {
            warn!("Rejected submission for {}: {}", self.selected_date, e);
            return Err(e.into());
        }

        match self.editing.as_deref() {
            Some(id) => {
                let event = global
                    .iter_mut()
                    .find(|event| event.id == id)
                    .ok_or_else(|| SchedulerError::EventNotFound { id: id.to_string() })?;
                event.apply_fields(fields);
                info!("Updated event {}", id);
            }
            None => {
                let event =
                    Event::from_fields(next_event_id(), self.selected_date, fields);
                info!("Created event {} on {}", event.id, event.date);
                global.push(event);
            }
        }

        let change = self.commit(global)?;
        self.editing = None;
        Ok(change)
    }

    /// Removes the event with `id` everywhere. Unknown ids are a no-op, but
    /// the collection is still written back.
    pub fn delete(&mut self, id: &str) -> Result<DayChange> {
        let mut global = self.store.load_all();
        let before = global.len();
        global.retain(|event| event.id != id);

        if global.len() == before {
            debug!("Delete of unknown event {}", id);
        } else {
            info!("Deleted event {}", id);
        }

        let change = self.commit(global)?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        Ok(change)
    }

    /// Case-insensitive text search over all stored events.
    pub fn filter(&self, query: &str) -> Vec<Event> {
        filter_events(self.store.load_all(), query)
    }

    /// Looks an event up across all days.
    pub fn find(&self, id: &str) -> Option<Event> {
        self.store.load_all().into_iter().find(|event| event.id == id)
    }

    fn commit(&mut self, global: Vec<Event>) -> Result<DayChange> {
        self.store.save_all(&global)?;
        self.day_events = global
            .iter()
            .filter(|event| event.date == self.selected_date)
            .cloned()
            .collect();

        Ok(DayChange {
            day_events: self.day_events.clone(),
            global_events: global,
        })
    }
}
