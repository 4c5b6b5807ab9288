use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::TaskPersistence;
use crate::services::database::Database;

/// Stores the collection under a named row of the `storage_slots` table.
pub struct SqliteSlotPersistence {
    db: Database,
    slot: String,
}

impl SqliteSlotPersistence {
    /// Wrap `db`, creating the schema if needed.
    pub fn new(db: Database, slot: impl Into<String>) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self {
            db,
            slot: slot.into(),
        })
    }

    /// Open (or create) the database file at `path`.
    pub fn open(path: &str, slot: impl Into<String>) -> Result<Self> {
        Self::new(Database::new(path)?, slot)
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl TaskPersistence for SqliteSlotPersistence {
    fn load(&self) -> Result<Option<String>> {
        self.db
            .connection()
            .query_row(
                "SELECT payload FROM storage_slots WHERE name = ?",
                [&self.slot],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("Failed to read storage slot '{}'", self.slot))
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        self.db
            .connection()
            .execute(
                "INSERT INTO storage_slots (name, payload, updated_at)
                 VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(name) DO UPDATE SET
                    payload = excluded.payload,
                    updated_at = excluded.updated_at",
                params![self.slot, payload],
            )
            .with_context(|| format!("Failed to write storage slot '{}'", self.slot))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite slot '{}'", self.slot)
    }
}
