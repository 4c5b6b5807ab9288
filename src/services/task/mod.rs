//! Task store entry point.
//! Owns the in-memory task collection and its durable slot; every mutation
//! persists the whole collection and notifies subscribers.

use crate::models::task::{Task, TaskId};
use crate::services::persistence::{encode_tasks, load_tasks, MemoryPersistence, TaskPersistence};
use crate::services::schedule::resolve_collisions;

pub mod crud;
pub mod queries;

/// What kind of mutation produced a [`StoreChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated { geometry: bool },
    Removed,
    Resolved,
}

/// Notification sent to subscribers after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    pub task_id: Option<TaskId>,
    pub revision: u64,
}

pub type ChangeListener = Box<dyn FnMut(&StoreChange)>;

/// Single-writer store for all tasks.
pub struct TaskStore {
    pub(crate) tasks: Vec<Task>,
    persistence: Box<dyn TaskPersistence>,
    listeners: Vec<ChangeListener>,
    revision: u64,
}

impl TaskStore {
    /// Load the collection from `persistence`.
    ///
    /// Missing or malformed data starts an empty collection. Loaded tasks are
    /// run through the collision resolver so stored overlaps never surface.
    pub fn open(persistence: Box<dyn TaskPersistence>) -> Self {
        let mut tasks = load_tasks(persistence.as_ref());
        let repaired = resolve_collisions(&mut tasks);
        if !repaired.is_empty() {
            log::info!("Repaired {} overlapping task(s) on load", repaired.len());
        }
        log::info!(
            "Loaded {} task(s) from {}",
            tasks.len(),
            persistence.describe()
        );

        Self {
            tasks,
            persistence,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Store backed by memory only
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryPersistence::new()))
    }

    /// Register a callback run after every mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of mutations applied since the store was opened
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn commit(&mut self, kind: ChangeKind, task_id: Option<TaskId>) {
        self.persist();
        self.revision += 1;

        let change = StoreChange {
            kind,
            task_id,
            revision: self.revision,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    // Best effort: a failed save keeps the in-memory change.
    fn persist(&mut self) {
        let result = encode_tasks(&self.tasks).and_then(|payload| self.persistence.save(&payload));
        if let Err(e) = result {
            log::error!(
                "Failed to save tasks to {}: {:#}",
                self.persistence.describe(),
                e
            );
        }
    }
}
