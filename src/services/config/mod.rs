//! Config file discovery, loading and saving, plus resolution of where the
//! task collection lives.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;

use crate::models::settings::{AppConfig, StorageBackend, StorageConfig};
use crate::services::persistence::{JsonFilePersistence, SqliteSlotPersistence, TaskPersistence};

const CONFIG_FILE: &str = "config.toml";

/// Reads and writes `AppConfig` as TOML at a fixed path.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the platform config file
    pub fn at_default_path() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file. A missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config {}", self.path.display()))?;
        AppConfig::from_toml(&content)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config {}", self.path.display()))
    }

    /// Like [`Self::load`], but unreadable or invalid files fall back to defaults.
    pub fn load_or_default(&self) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {:#}, using defaults", e);
                AppConfig::default()
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config.validate().map_err(anyhow::Error::msg)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let content = config.to_toml().context("Failed to serialize config")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config {}", self.path.display()))?;
        log::info!("Saved config to {}", self.path.display());
        Ok(())
    }
}

/// Platform config file; the working directory in debug builds.
pub fn default_config_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from(CONFIG_FILE)
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(proj_dirs) = ProjectDirs::from("com", "MindFrame", "MindFrame") {
            proj_dirs.config_dir().join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }
}

/// Where the task collection is stored for `storage`.
pub fn resolve_data_path(storage: &StorageConfig) -> PathBuf {
    if let Some(path) = &storage.path {
        return path.clone();
    }

    let file_name = match storage.backend {
        StorageBackend::Sqlite => "mindframe.db",
        StorageBackend::Json => "mindframe_tasks.json",
    };

    #[cfg(debug_assertions)]
    {
        PathBuf::from(file_name)
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(proj_dirs) = ProjectDirs::from("com", "MindFrame", "MindFrame") {
            proj_dirs.data_dir().join(file_name)
        } else {
            PathBuf::from(file_name)
        }
    }
}

/// Open the configured persistence backend.
pub fn open_persistence(storage: &StorageConfig) -> Result<Box<dyn TaskPersistence>> {
    let path = resolve_data_path(storage);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data dir {}", parent.display()))?;
    }

    let persistence: Box<dyn TaskPersistence> = match storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteSlotPersistence::open(
            &path.to_string_lossy(),
            storage.slot_name.clone(),
        )?),
        StorageBackend::Json => Box::new(JsonFilePersistence::new(path)),
    };
    Ok(persistence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(dir.path().join("nested").join("config.toml"));

        let mut config = AppConfig::default();
        config.grid.slot_height_px = 20.0;
        config.export.timezone = "America/New_York".to_string();
        config.storage.backend = StorageBackend::Json;
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export]\ntimezone = \"Nowhere/Special\"\n").unwrap();
        let service = ConfigService::new(&path);

        assert!(service.load().is_err());
        assert_eq!(service.load_or_default(), AppConfig::default());
    }

    #[test]
    fn test_explicit_data_path_wins() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("/tmp/somewhere.db")),
            ..StorageConfig::default()
        };
        assert_eq!(resolve_data_path(&storage), PathBuf::from("/tmp/somewhere.db"));
    }

    #[test]
    fn test_open_json_backend() {
        let dir = TempDir::new().unwrap();
        let storage = StorageConfig {
            backend: StorageBackend::Json,
            path: Some(dir.path().join("data").join("tasks.json")),
            ..StorageConfig::default()
        };

        let mut persistence = open_persistence(&storage).unwrap();
        assert_eq!(persistence.load().unwrap(), None);
        persistence.save("[]").unwrap();
        assert_eq!(persistence.load().unwrap(), Some("[]".to_string()));
    }
}
