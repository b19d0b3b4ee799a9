use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use log::{debug, error, info, trace, warn};
use serde::Deserialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::{Config, Event, Result, SchedulerError};

/// Persistence port for the full event collection.
///
/// The collection is stored as a single blob: every save replaces all of it.
/// There is no locking, so two processes sharing a blob race and the last
/// `save_all` wins.
pub trait EventStore {
    /// Returns every readable stored event. An absent or malformed blob reads
    /// as empty; individual unreadable records are skipped.
    fn load_all(&self) -> Vec<Event>;

    /// Replaces the stored collection with `events`.
    fn save_all(&mut self, events: &[Event]) -> Result<()>;

    /// Events whose date is `date`, in storage order.
    fn load_for_date(&self, date: NaiveDate) -> Vec<Event> {
        self.load_all()
            .into_iter()
            .filter(|event| event.date == date)
            .collect()
    }
}

/// Splits a stored blob into readable events and the records that could not
/// be read. Only an unreadable top level reads as an empty collection.
fn decode_records(raw: &str, source: &str) -> (Vec<Event>, Vec<Value>) {
    let records = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("Ignoring unreadable event data in {}: {}", source, e);
            return (Vec::new(), Vec::new());
        }
    };

    let mut events = Vec::with_capacity(records.len());
    let mut unreadable = Vec::new();
    for record in records {
        match Event::deserialize(&record) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!("Skipping unreadable event record in {}: {}", source, e);
                unreadable.push(record);
            }
        }
    }

    trace!(
        "Decoded {} events from {} ({} unreadable)",
        events.len(),
        source,
        unreadable.len()
    );
    (events, unreadable)
}

/// Serializes `events`, followed verbatim by the unreadable records of the
/// blob being replaced so that a save never drops them.
fn encode_blob(events: &[Event], previous: Option<&str>, pretty: bool) -> Result<String> {
    let unreadable = previous
        .map(|raw| decode_records(raw, "previous blob").1)
        .unwrap_or_default();

    let json = if unreadable.is_empty() {
        if pretty {
            serde_json::to_string_pretty(events)
        } else {
            serde_json::to_string(events)
        }
    } else {
        debug!("Carrying over {} unreadable records", unreadable.len());
        let mut records = events
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()?;
        records.extend(unreadable);
        if pretty {
            serde_json::to_string_pretty(&records)
        } else {
            serde_json::to_string(&records)
        }
    };

    json.map_err(|e| {
        error!("Failed to serialize events: {}", e);
        SchedulerError::Serialization(e)
    })
}

/// Stores the collection as one JSON file, `<data_dir>/<storage_key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the location named by `config`, creating the data
    /// directory if needed.
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.data_dir.exists() {
            debug!(
                "Data directory does not exist, creating: {}",
                config.data_dir.display()
            );
            fs::create_dir_all(&config.data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                SchedulerError::DirectoryError {
                    path: config.data_dir.clone(),
                }
            })?;
        }

        Ok(Self::new(config.storage_path()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load_all(&self) -> Vec<Event> {
        debug!("Loading events from {}", self.path.display());
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_records(&raw, &self.path.display().to_string()).0,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No event file at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Writes to a temporary file next to the target and persists it over
    /// the target, so readers see either the old or the new collection.
    fn save_all(&mut self, events: &[Event]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        trace!("Serializing {} events", events.len());
        let previous = fs::read_to_string(&self.path).ok();
        let json = encode_blob(events, previous.as_deref(), true)?;

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file in {}: {}", dir.display(), e);
            SchedulerError::Io(e)
        })?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&self.path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                self.path.display(),
                e.error
            );
            SchedulerError::Io(e.error)
        })?;

        info!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the serialized collection in memory. Goes through the same
/// encoding as [`JsonFileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw blob text, which need not be valid.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: Some(raw.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl EventStore for MemoryStore {
    fn load_all(&self) -> Vec<Event> {
        self.blob
            .as_deref()
            .map(|raw| decode_records(raw, "memory").0)
            .unwrap_or_default()
    }

    fn save_all(&mut self, events: &[Event]) -> Result<()> {
        self.blob = Some(encode_blob(events, self.blob.as_deref(), false)?);
        debug!("Saved {} events to memory", events.len());
        Ok(())
    }
}
