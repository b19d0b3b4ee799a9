//! Shared result types and the command set of the dayplan application.
use clap::Subcommand;

use crate::{Event, SchedulerError, TimeOfDay};

/// A specialized Result type for dayplan operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Outcome of a successful create, update or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayChange {
    /// Events of the selected day after the change
    pub day_events: Vec<Event>,
    /// The full collection as saved
    pub global_events: Vec<Event>,
}

/// Available subcommands for the dayplan application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the events of a day
    Day {
        /// Date as YYYY-MM-DD, defaults to today
        date: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Add an event to a day
    Add {
        /// Name of the event
        #[clap(short, long)]
        name: String,

        /// Start time, HH:MM
        #[clap(short, long)]
        start: TimeOfDay,

        /// End time, HH:MM
        #[clap(short, long)]
        end: TimeOfDay,

        /// Optional description
        #[clap(short = 'D', long)]
        description: Option<String>,

        /// Optional type tag, used by filter
        #[clap(short = 't', long = "type")]
        kind: Option<String>,

        /// Date as YYYY-MM-DD, defaults to today
        #[clap(short, long)]
        date: Option<String>,
    },

    /// Edit an existing event; omitted fields keep their current value
    Edit {
        /// ID of the event to edit
        id: String,

        #[clap(short, long)]
        name: Option<String>,

        #[clap(short, long)]
        start: Option<TimeOfDay>,

        #[clap(short, long)]
        end: Option<TimeOfDay>,

        /// New description, pass an empty string to clear it
        #[clap(short = 'D', long)]
        description: Option<String>,

        /// New type tag, pass an empty string to clear it
        #[clap(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Delete an event by ID
    Delete {
        /// ID of the event to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show one event in full
    Show {
        /// ID of the event to show
        id: String,
    },

    /// Search events of all days by name, description or type
    Filter {
        /// Search query text
        query: String,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },
}
