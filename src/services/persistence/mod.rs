//! Durable storage for the task collection.
//!
//! The whole collection is written to one named slot after every store
//! mutation and read back once at start-up. Backends only move opaque
//! payloads; encoding and the "malformed means empty" rule live here.

use anyhow::Result;

use crate::models::task::Task;

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFilePersistence;
pub use memory::MemoryPersistence;
pub use sqlite::SqliteSlotPersistence;

/// A durable slot holding the serialized task collection.
#[cfg_attr(test, mockall::automock)]
pub trait TaskPersistence {
    /// Raw payload, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored payload.
    fn save(&mut self, payload: &str) -> Result<()>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

/// Serialize the collection as a JSON array of task records.
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parse a stored payload. Anything malformed yields an empty collection.
pub fn decode_tasks(payload: &str) -> Vec<Task> {
    match serde_json::from_str::<Vec<Task>>(payload) {
        Ok(tasks) => tasks,
        Err(e) => {
            log::warn!("Discarding malformed task collection: {}", e);
            Vec::new()
        }
    }
}

/// Load through `persistence`, treating read errors like missing data.
pub fn load_tasks(persistence: &dyn TaskPersistence) -> Vec<Task> {
    match persistence.load() {
        Ok(Some(payload)) => decode_tasks(&payload),
        Ok(None) => {
            log::info!("No saved tasks at {}, starting empty", persistence.describe());
            Vec::new()
        }
        Err(e) => {
            log::warn!(
                "Failed to read tasks from {}: {:#}; starting empty",
                persistence.describe(),
                e
            );
            Vec::new()
        }
    }
}
