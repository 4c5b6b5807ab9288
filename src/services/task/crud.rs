use super::{ChangeKind, TaskStore};
use crate::models::grid::Section;
use crate::models::task::{BacklogList, Priority, Task, TaskError, TaskId, TaskPatch};
use crate::services::schedule::{resolve_collisions, resolve_section};

impl TaskStore {
    /// Create a task in a backlog list with the default duration.
    pub fn create(
        &mut self,
        title: &str,
        priority: Priority,
        list: BacklogList,
    ) -> Result<Task, TaskError> {
        let task = Task::new(title, priority, list)?;
        log::info!("Created task {} '{}' in {}", task.id, task.title, list);

        self.tasks.push(task.clone());
        self.commit(ChangeKind::Created, Some(task.id.clone()));
        Ok(task)
    }

    /// Merge `patch` into the task with `id`.
    ///
    /// Unknown ids are ignored and return `false`. A patch that moves or
    /// resizes a scheduled task also resolves collisions in that task's
    /// section before the change is persisted.
    pub fn patch(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            log::debug!("Ignoring patch for unknown task {}", id);
            return false;
        };

        let effect = task.apply(&patch);
        let section = task.section();

        if effect.geometry {
            if let Some(section) = section {
                resolve_section(&mut self.tasks, section);
            }
        }

        self.commit(
            ChangeKind::Updated {
                geometry: effect.geometry,
            },
            Some(id.clone()),
        );
        true
    }

    /// Delete the task with `id`. Unknown ids are ignored and return `false`.
    pub fn remove(&mut self, id: &TaskId) -> bool {
        let Some(position) = self.tasks.iter().position(|t| &t.id == id) else {
            log::debug!("Ignoring removal of unknown task {}", id);
            return false;
        };

        let removed = self.tasks.remove(position);
        log::info!("Removed task {} '{}'", removed.id, removed.title);
        self.commit(ChangeKind::Removed, Some(removed.id));
        true
    }

    /// Run the collision resolver over every section.
    pub fn resolve_all(&mut self) -> Vec<TaskId> {
        let changed = resolve_collisions(&mut self.tasks);
        if !changed.is_empty() {
            self.commit(ChangeKind::Resolved, None);
        }
        changed
    }

    /// Run the collision resolver over one section.
    pub fn resolve_section(&mut self, section: Section) -> Vec<TaskId> {
        let changed = resolve_section(&mut self.tasks, section);
        if !changed.is_empty() {
            self.commit(ChangeKind::Resolved, None);
        }
        changed
    }
}
