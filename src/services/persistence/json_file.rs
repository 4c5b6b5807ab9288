use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::TaskPersistence;

/// Stores the collection as a JSON file on disk.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read tasks from {}", self.path.display()))?;
        Ok(Some(data))
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write tasks to {}", self.path.display()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
