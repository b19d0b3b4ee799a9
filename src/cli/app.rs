//! CLI module for the dayplan application
//!
//! This module plays the part of the calendar front end: it picks the day,
//! turns flags into submitted fields and renders the results.
use std::io::{stdin, stdout, Write};

use chrono::{Local, NaiveDate};
use log::info;

use crate::{
    parse_date, Commands, Event, EventFields, EventScheduler, EventStore, Result, SchedulerError,
    TimeOfDay,
};

/// CLI Application handler - processes CLI commands against an EventScheduler
pub struct App<S: EventStore> {
    scheduler: EventScheduler<S>,

    /// Whether to display verbose output
    verbose: bool,
}

impl<S: EventStore> App<S> {
    /// Create a new CLI application over the given store, showing today
    pub fn new(store: S, verbose: bool) -> Self {
        Self {
            scheduler: EventScheduler::new(store, Local::now().date_naive()),
            verbose,
        }
    }

    pub fn scheduler(&self) -> &EventScheduler<S> {
        &self.scheduler
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Day { date, json } => {
                let date = self.resolve_date(date.as_deref())?;
                let events = self.scheduler.select_day(date).to_vec();
                self.display_day(date, &events, json)?;
            }

            Commands::Add {
                name,
                start,
                end,
                description,
                kind,
                date,
            } => self.handle_add(name, start, end, description, kind, date.as_deref())?,

            Commands::Edit {
                id,
                name,
                start,
                end,
                description,
                kind,
            } => self.handle_edit(&id, name, start, end, description, kind)?,

            Commands::Delete { id, force } => self.handle_delete(&id, force)?,

            Commands::Show { id } => self.handle_show(&id)?,

            Commands::Filter { query, json } => {
                let events = self.scheduler.filter(&query);
                self.display_filtered(&query, &events, json)?;
            }
        }

        Ok(())
    }

    fn resolve_date(&self, date: Option<&str>) -> Result<NaiveDate> {
        match date {
            Some(value) => parse_date(value),
            None => Ok(Local::now().date_naive()),
        }
    }

    fn handle_add(
        &mut self,
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
        description: Option<String>,
        kind: Option<String>,
        date: Option<&str>,
    ) -> Result<()> {
        let date = self.resolve_date(date)?;
        self.scheduler.select_day(date);

        let fields = EventFields {
            name,
            start_time: start,
            end_time: end,
            description,
            kind,
        };
        let change = self.scheduler.submit(fields)?;

        if let Some(event) = change.day_events.last() {
            println!("Event created with ID: {}", event.id);
        }
        if self.verbose {
            self.display_day(date, &change.day_events, false)?;
        }
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: &str,
        name: Option<String>,
        start: Option<TimeOfDay>,
        end: Option<TimeOfDay>,
        description: Option<String>,
        kind: Option<String>,
    ) -> Result<()> {
        // Edits happen on the event's own day
        let date = self
            .scheduler
            .find(id)
            .map(|event| event.date)
            .ok_or_else(|| SchedulerError::EventNotFound { id: id.to_string() })?;
        self.scheduler.select_day(date);

        // Prefill from the stored event, then overlay the given flags
        let mut fields = self.scheduler.begin_edit(id)?.fields();
        if let Some(name) = name {
            fields.name = name;
        }
        if let Some(start) = start {
            fields.start_time = start;
        }
        if let Some(end) = end {
            fields.end_time = end;
        }
        if description.is_some() {
            fields.description = description;
        }
        if kind.is_some() {
            fields.kind = kind;
        }

        self.scheduler.submit(fields)?;
        println!("Event {} updated.", id);
        Ok(())
    }

    fn handle_delete(&mut self, id: &str, force: bool) -> Result<()> {
        let Some(event) = self.scheduler.find(id) else {
            // Still a write: deleting an unknown id is a no-op
            self.scheduler.delete(id)?;
            println!("No event with ID {}; nothing deleted.", id);
            return Ok(());
        };

        if !force {
            println!("You are about to delete the following event:");
            self.print_event(&event, true);

            print!("\nAre you sure you want to delete this event? [y/N]: ");
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.scheduler.select_day(event.date);
        self.scheduler.delete(id)?;
        info!("Deleted event {} from {}", id, event.date);
        println!("Event '{}' ({}) has been deleted.", event.name, event.id);
        Ok(())
    }

    fn handle_show(&self, id: &str) -> Result<()> {
        let event = self
            .scheduler
            .find(id)
            .ok_or_else(|| SchedulerError::EventNotFound { id: id.to_string() })?;
        self.print_event(&event, true);
        Ok(())
    }

    /// Display the events of one day
    fn display_day(&self, date: NaiveDate, events: &[Event], json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(events)?);
            return Ok(());
        }

        println!("Events for {}", console::style(date).bold());
        if events.is_empty() {
            println!("No events scheduled for this day.");
            return Ok(());
        }

        for event in events {
            self.print_event(event, self.verbose);
        }
        Ok(())
    }

    /// Display filter results, one line per event with its date
    fn display_filtered(&self, query: &str, events: &[Event], json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(events)?);
            return Ok(());
        }

        if events.is_empty() {
            println!("No events found matching query: \"{}\"", query);
            return Ok(());
        }

        for event in events {
            println!("{} - {}", console::style(&event.name).bold(), event.date);
        }
        println!(
            "\nFound {} matching event{}.",
            events.len(),
            if events.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn print_event(&self, event: &Event, detailed: bool) {
        println!(
            "{} ({} - {})  [{}]",
            console::style(&event.name).bold(),
            event.start_time,
            event.end_time,
            console::style(&event.id).dim()
        );

        if !detailed {
            return;
        }

        println!("  Date: {}", event.date);
        if let Some(kind) = &event.kind {
            println!("  Type: {}", console::style(kind).cyan());
        }
        match &event.description {
            Some(description) => println!("  {}", description),
            None => println!("  No description available."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, ValidationError};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn add(name: &str, start: &str, end: &str, date: &str) -> Commands {
        Commands::Add {
            name: name.to_string(),
            start: t(start),
            end: t(end),
            description: None,
            kind: None,
            date: Some(date.to_string()),
        }
    }

    fn app() -> App<MemoryStore> {
        App::new(MemoryStore::new(), false)
    }

    #[test]
    fn add_places_event_on_requested_day() {
        let mut app = app();
        app.run(add("Standup", "09:00", "09:15", "2024-05-06")).unwrap();

        let stored = app.scheduler().store().load_all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].date, "2024-05-06".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn add_surfaces_overlap() {
        let mut app = app();
        app.run(add("A", "09:00", "10:00", "2024-05-06")).unwrap();
        let err = app.run(add("B", "09:30", "10:30", "2024-05-06")).unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::OverlapConflict { .. })
        ));
    }

    #[test]
    fn add_rejects_bad_date() {
        let mut app = app();
        let err = app.run(add("A", "09:00", "10:00", "tomorrow")).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidDate { .. }));
    }

    #[test]
    fn edit_keeps_unspecified_fields() {
        let mut app = app();
        app.run(Commands::Add {
            name: "Review".to_string(),
            start: t("13:00"),
            end: t("14:00"),
            description: Some("quarterly".to_string()),
            kind: Some("work".to_string()),
            date: Some("2024-05-06".to_string()),
        })
        .unwrap();
        let id = app.scheduler().store().load_all()[0].id.clone();

        app.run(Commands::Edit {
            id: id.clone(),
            name: None,
            start: None,
            end: Some(t("15:00")),
            description: Some(String::new()),
            kind: None,
        })
        .unwrap();

        let event = app.scheduler().find(&id).unwrap();
        assert_eq!(event.name, "Review");
        assert_eq!(event.end_time, t("15:00"));
        assert_eq!(event.description, None);
        assert_eq!(event.kind.as_deref(), Some("work"));
    }

    #[test]
    fn edit_unknown_id_fails() {
        let mut app = app();
        let err = app
            .run(Commands::Edit {
                id: "nope".to_string(),
                name: None,
                start: None,
                end: None,
                description: None,
                kind: None,
            })
            .unwrap_err();
        assert!(matches!(err, SchedulerError::EventNotFound { .. }));
    }

    #[test]
    fn forced_delete_removes_event() {
        let mut app = app();
        app.run(add("A", "09:00", "10:00", "2024-05-06")).unwrap();
        let id = app.scheduler().store().load_all()[0].id.clone();

        app.run(Commands::Delete { id, force: true }).unwrap();
        assert!(app.scheduler().store().load_all().is_empty());
    }

    #[test]
    fn delete_unknown_id_still_succeeds() {
        let mut app = app();
        app.run(add("A", "09:00", "10:00", "2024-05-06")).unwrap();
        app.run(Commands::Delete {
            id: "missing".to_string(),
            force: false,
        })
        .unwrap();
        assert_eq!(app.scheduler().store().load_all().len(), 1);
    }
}
