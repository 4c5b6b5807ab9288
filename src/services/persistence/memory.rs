use anyhow::Result;

use super::TaskPersistence;

/// Keeps the payload in memory only. Used for throwaway sessions and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    payload: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing payload, as if loaded from disk
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }
}

impl TaskPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
