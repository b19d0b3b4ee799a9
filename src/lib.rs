//! Single-day event scheduler library
//!
//! This library keeps time-boxed events per calendar day in one persisted
//! collection, rejects overlapping or empty slots, and filters events by text
//! across all days.

mod cli;
mod config;
mod errors;
mod event;
mod helper;
mod scheduler;
mod storage;
mod time;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use event::*;
pub use helper::*;
pub use scheduler::*;
pub use storage::*;
pub use time::*;
pub use types::*;
