// Settings module
// Application configuration persisted as TOML

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default durable slot the task collection is saved under
pub const DEFAULT_SLOT_NAME: &str = "mindframe_tasks_v1";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub grid: GridConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Database or JSON file; platform data dir when unset
    pub path: Option<PathBuf>,
    pub slot_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: None,
            slot_name: DEFAULT_SLOT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rendered height of one 15-minute slot, for pixel -> slot conversion
    pub slot_height_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { slot_height_px: 12.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub title: String,
    /// IANA zone name written into calendar exports
    pub timezone: String,
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "MindFrame Daily Schedule".to_string(),
            timezone: "Europe/Berlin".to_string(),
            output_dir: None,
        }
    }
}

impl ExportConfig {
    pub fn tz(&self) -> Result<Tz, String> {
        Tz::from_str(&self.timezone).map_err(|_| format!("Unknown timezone '{}'", self.timezone))
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.storage.slot_name.trim().is_empty() {
            return Err("Storage slot name cannot be empty".to_string());
        }
        if !(self.grid.slot_height_px.is_finite() && self.grid.slot_height_px > 0.0) {
            return Err("Slot height must be a positive number of pixels".to_string());
        }
        self.export.tz()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: AppConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.slot_name, DEFAULT_SLOT_NAME);
        assert_eq!(config.grid.slot_height_px, 12.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Json;
        config.export.timezone = "America/New_York".to_string();

        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed = AppConfig::from_toml("[grid]\nslot_height_px = 20.0\n").unwrap();
        assert_eq!(parsed.grid.slot_height_px, 20.0);
        assert_eq!(parsed.export, ExportConfig::default());
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let err = AppConfig::from_toml("[export]\ntimezone = \"Mars/Olympus\"\n").unwrap_err();
        assert!(err.contains("Unknown timezone"));
    }

    #[test]
    fn test_zero_slot_height_rejected() {
        assert!(AppConfig::from_toml("[grid]\nslot_height_px = 0.0\n").is_err());
    }
}
