use super::TaskStore;
use crate::models::grid::Section;
use crate::models::task::{BacklogList, Task, TaskId};

impl TaskStore {
    /// Snapshot of every task in insertion order.
    pub fn all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Borrowed view of every task in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Look a task up by full id or by an unambiguous id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        if let Some(exact) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Some(exact);
        }

        let mut matches = self
            .tasks
            .iter()
            .filter(|t| t.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    /// Tasks waiting in `list`, in insertion order.
    pub fn backlog(&self, list: BacklogList) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.backlog_list() == Some(list))
            .collect()
    }

    /// Scheduled tasks ordered by start slot.
    pub fn scheduled(&self) -> Vec<&Task> {
        let mut scheduled: Vec<&Task> = self.tasks.iter().filter(|t| t.is_scheduled()).collect();
        scheduled.sort_by_key(|t| t.placement().map(|p| p.start_index));
        scheduled
    }

    /// Scheduled tasks starting in `section`, ordered by start slot.
    pub fn in_section(&self, section: Section) -> Vec<&Task> {
        self.scheduled()
            .into_iter()
            .filter(|t| t.section() == Some(section))
            .collect()
    }
}
