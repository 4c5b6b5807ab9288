use std::path::PathBuf;

use anyhow::{anyhow, Result};

use mindframe::models::settings::AppConfig;
use mindframe::models::task::{Task, TaskId};
use mindframe::services::config::{open_persistence, ConfigService};
use mindframe::services::interaction::InteractionCoordinator;
use mindframe::services::task::TaskStore;

pub mod export;
pub mod gestures;
pub mod tasks;

/// Everything one command invocation works with.
pub struct Session {
    pub config: AppConfig,
    pub store: TaskStore,
    pub coordinator: InteractionCoordinator,
}

impl Session {
    pub fn open(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::new(path),
            None => ConfigService::at_default_path(),
        };
        let mut config = config_service.load_or_default();
        if let Some(path) = data_path {
            config.storage.path = Some(path);
        }

        let store = TaskStore::open(open_persistence(&config.storage)?);
        let coordinator = InteractionCoordinator::new(&config.grid);

        Ok(Self {
            config,
            store,
            coordinator,
        })
    }

    /// Resolve a full id or unique id prefix
    pub fn task_id(&self, prefix: &str) -> Result<TaskId> {
        self.store
            .find_by_prefix(prefix)
            .map(|task| task.id.clone())
            .ok_or_else(|| anyhow!("no single task matches id '{}'", prefix))
    }

    pub fn task(&self, id: &TaskId) -> Result<&Task> {
        self.store
            .get(id)
            .ok_or_else(|| anyhow!("task {} disappeared", id))
    }
}

/// One-line summary used by every command's output.
pub fn describe(task: &Task) -> String {
    use mindframe::models::grid::slot_to_time;

    match task.placement() {
        Some(p) => format!(
            "{}  {}-{}  P{}  {}",
            task.id,
            slot_to_time(p.start_index),
            slot_to_time(p.end_index()),
            task.priority,
            task.title
        ),
        None => format!("{}  P{}  {}", task.id, task.priority, task.title),
    }
}
