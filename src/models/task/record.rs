//! Persisted form of a task.
//!
//! The stored collection uses flat records where the location is encoded by
//! nullable fields (`list` set means backlog, otherwise `startIndex` means
//! scheduled). Converting back into a [`Task`] re-validates that encoding.

use serde::{Deserialize, Serialize};

use super::{BacklogList, Location, Placement, Priority, Task, TaskError, TaskId};
use crate::models::grid::{DAY_SLOTS, DEFAULT_DURATION_SLOTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub priority: u8,
    #[serde(default)]
    pub list: Option<BacklogList>,
    #[serde(default)]
    pub start_index: Option<u32>,
    #[serde(default = "default_duration")]
    pub duration_slots: u32,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SLOTS
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (list, start_index, duration_slots) = match task.location {
            Location::Backlog(list) => (Some(list), None, DEFAULT_DURATION_SLOTS),
            Location::Scheduled(p) => (None, Some(p.start_index), p.duration_slots),
        };
        Self {
            id: task.id.to_string(),
            title: task.title,
            priority: task.priority.value(),
            list,
            start_index,
            duration_slots,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| TaskError::InvalidRecord {
            id: record.id.clone(),
            reason: reason.to_string(),
        };

        if record.id.trim().is_empty() {
            return Err(invalid("missing id"));
        }
        let title = record.title.trim();
        if title.is_empty() {
            return Err(invalid("empty title"));
        }
        let priority = Priority::try_from(record.priority).map_err(|e| invalid(&e.to_string()))?;

        let location = match (record.list, record.start_index) {
            (Some(list), _) => Location::Backlog(list),
            (None, Some(start)) if start < DAY_SLOTS => {
                if record.duration_slots == 0 {
                    return Err(invalid("durationSlots must be positive"));
                }
                Location::Scheduled(Placement::clamped(start, record.duration_slots))
            }
            (None, Some(_)) => return Err(invalid("startIndex outside the day grid")),
            (None, None) => return Err(invalid("neither backlog list nor startIndex set")),
        };

        Ok(Task {
            id: TaskId::from(record.id.as_str()),
            title: title.to_string(),
            priority,
            location,
        })
    }
}
