//! Error types for the dayplan application.
//!
//! Validation failures are kept apart from the crate error so callers can
//! tell a rejected submission (user can correct and resubmit) from an
//! environment failure.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::TimeOfDay;

/// Reasons a submitted event is rejected. None of these mutate any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The event name is empty.
    #[error("Event name is required.")]
    MissingName,

    /// End time is not after start time.
    #[error("End time should be greater than start time ({start} - {end}).")]
    InvalidDuration { start: TimeOfDay, end: TimeOfDay },

    /// The slot collides with another event on the same day.
    #[error(
        "Event overlaps with existing event '{name}' ({start} - {end}). Please choose a different time."
    )]
    OverlapConflict {
        id: String,
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

/// The main error type for the dayplan application.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submission was rejected.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Event was not found when performing an operation.
    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    /// A time of day could not be parsed.
    #[error("Invalid time '{value}', expected HH:MM")]
    InvalidTime { value: String },

    /// A calendar date could not be parsed.
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },
}

impl SchedulerError {
    /// Returns the validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            SchedulerError::Validation(e) => Some(e),
            _ => None,
        }
    }
}
