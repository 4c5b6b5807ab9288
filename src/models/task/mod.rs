// Task module
// Planner task model: backlog vs. scheduled placement on the day grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::grid::{section_of, Section, DAY_SLOTS, DEFAULT_DURATION_SLOTS};

mod record;

pub use record::TaskRecord;

/// Validation and parse failures for task data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Invalid priority {0}: expected 1 (high), 2 (medium) or 3 (low)")]
    InvalidPriority(String),

    #[error("Unknown backlog list '{0}': expected 'today' or 'week'")]
    UnknownList(String),

    #[error("Unknown section '{0}': expected night, morning, midday or evening")]
    UnknownSection(String),

    #[error("Invalid task record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// Opaque task identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh identifier (`t-<uuid v4>`)
    pub fn generate() -> Self {
        Self(format!("t-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Display priority. Has no influence on placement.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    High = 1,
    #[default]
    Medium = 2,
    Low = 3,
}

impl Priority {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = TaskError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(TaskError::InvalidPriority(other.to_string())),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "high" => Ok(Priority::High),
            "2" | "medium" => Ok(Priority::Medium),
            "3" | "low" => Ok(Priority::Low),
            other => Err(TaskError::InvalidPriority(other.to_string())),
        }
    }
}

/// The two unscheduled lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BacklogList {
    Today,
    Week,
}

impl BacklogList {
    pub fn id(self) -> &'static str {
        match self {
            BacklogList::Today => "today",
            BacklogList::Week => "week",
        }
    }
}

impl fmt::Display for BacklogList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BacklogList {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(BacklogList::Today),
            "week" => Ok(BacklogList::Week),
            other => Err(TaskError::UnknownList(other.to_string())),
        }
    }
}

/// Where a task sits on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub start_index: u32,
    pub duration_slots: u32,
}

impl Placement {
    /// Create a placement; the duration is floored at one slot
    pub fn new(start_index: u32, duration_slots: u32) -> Self {
        Self {
            start_index,
            duration_slots: duration_slots.max(1),
        }
    }

    /// Pull a proposed placement onto the grid: the start into `[0, 96)` and
    /// the duration into `[1, room left in the start's section]`.
    pub fn clamped(start_index: u32, duration_slots: u32) -> Self {
        let start_index = start_index.min(DAY_SLOTS - 1);
        let room = section_of(start_index)
            .map(|section| section.end() - start_index)
            .unwrap_or(1);
        Self {
            start_index,
            duration_slots: duration_slots.clamp(1, room),
        }
    }

    /// One past the last occupied slot
    pub fn end_index(&self) -> u32 {
        self.start_index.saturating_add(self.duration_slots)
    }

    pub fn section(&self) -> Option<Section> {
        section_of(self.start_index)
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.start_index < other.end_index() && other.start_index < self.end_index()
    }
}

/// A task is either waiting in a backlog list or placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Backlog(BacklogList),
    Scheduled(Placement),
}

/// A planner task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub location: Location,
}

impl Task {
    /// Create a backlog task with a fresh id
    ///
    /// # Examples
    /// ```
    /// use mindframe::models::task::{BacklogList, Priority, Task};
    ///
    /// let task = Task::new("  Write report ", Priority::High, BacklogList::Today).unwrap();
    /// assert_eq!(task.title, "Write report");
    /// assert!(!task.is_scheduled());
    /// ```
    pub fn new(
        title: impl Into<String>,
        priority: Priority,
        list: BacklogList,
    ) -> Result<Self, TaskError> {
        let title = normalize_title(&title.into()).ok_or(TaskError::EmptyTitle)?;
        Ok(Self {
            id: TaskId::generate(),
            title,
            priority,
            location: Location::Backlog(list),
        })
    }

    pub fn placement(&self) -> Option<Placement> {
        match self.location {
            Location::Scheduled(placement) => Some(placement),
            Location::Backlog(_) => None,
        }
    }

    pub fn placement_mut(&mut self) -> Option<&mut Placement> {
        match &mut self.location {
            Location::Scheduled(placement) => Some(placement),
            Location::Backlog(_) => None,
        }
    }

    pub fn backlog_list(&self) -> Option<BacklogList> {
        match self.location {
            Location::Backlog(list) => Some(list),
            Location::Scheduled(_) => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.location, Location::Scheduled(_))
    }

    /// Section holding the task's start slot, if scheduled
    pub fn section(&self) -> Option<Section> {
        self.placement().and_then(|p| p.section())
    }

    /// Duration used when this task is dragged onto the grid
    pub fn drag_duration_slots(&self) -> u32 {
        self.placement()
            .map(|p| p.duration_slots)
            .unwrap_or(DEFAULT_DURATION_SLOTS)
    }

    /// Merge `patch` into the task.
    pub fn apply(&mut self, patch: &TaskPatch) -> PatchEffect {
        let mut effect = PatchEffect::default();

        if let Some(title) = &patch.title {
            match normalize_title(title) {
                Some(title) if title != self.title => {
                    self.title = title;
                    effect.changed = true;
                }
                Some(_) => {}
                None => log::debug!("Ignoring blank title edit for task {}", self.id),
            }
        }

        if let Some(priority) = patch.priority {
            if priority != self.priority {
                self.priority = priority;
                effect.changed = true;
            }
        }

        if let Some(location) = patch.location {
            let location = match location {
                Location::Scheduled(p) => {
                    Location::Scheduled(Placement::clamped(p.start_index, p.duration_slots))
                }
                backlog => backlog,
            };
            if location != self.location {
                self.location = location;
                effect.changed = true;
                effect.geometry = true;
            }
        }

        if let Some(duration) = patch.duration_slots {
            if let Some(placement) = self.placement_mut() {
                let duration = Placement::clamped(placement.start_index, duration).duration_slots;
                if placement.duration_slots != duration {
                    placement.duration_slots = duration;
                    effect.changed = true;
                    effect.geometry = true;
                }
            }
        }

        effect
    }
}

/// Partial update for a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub location: Option<Location>,
    pub duration_slots: Option<u32>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the task on the grid
    pub fn schedule(start_index: u32, duration_slots: u32) -> Self {
        Self::new().location(Location::Scheduled(Placement::new(start_index, duration_slots)))
    }

    /// Move the task back to a backlog list, clearing its geometry
    pub fn to_backlog(list: BacklogList) -> Self {
        Self::new().location(Location::Backlog(list))
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Resize; only meaningful for scheduled tasks
    pub fn duration_slots(mut self, duration_slots: u32) -> Self {
        self.duration_slots = Some(duration_slots);
        self
    }

    /// True if applying the patch may move or resize the task
    pub fn touches_geometry(&self) -> bool {
        self.location.is_some() || self.duration_slots.is_some()
    }
}

/// What applying a patch actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchEffect {
    pub changed: bool,
    pub geometry: bool,
}

fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
