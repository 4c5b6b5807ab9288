use std::fmt;

use crate::models::grid::Section;
use crate::models::task::{BacklogList, Placement, Task, TaskId};
use crate::services::schedule::resolve_drop_index;

/// Which input protocol reported a drag event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Platform drag-and-drop events
    Native,
    /// Pointer gesture tracking
    Pointer,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Native => f.write_str("native"),
            InputSource::Pointer => f.write_str("pointer"),
        }
    }
}

/// Something a dragged task can be released over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    Backlog(BacklogList),
    /// A section body, `offset_slots` below its top edge
    Section { section: Section, offset_slots: f64 },
    Delete,
}

/// Ghost shown while a drag hovers a section. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropPreview {
    pub section: Section,
    pub start_index: u32,
    pub duration_slots: u32,
}

impl DropPreview {
    pub fn placement(&self) -> Placement {
        Placement::new(self.start_index, self.duration_slots)
    }
}

/// What a committed drop did to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Backlogged(BacklogList),
    /// Final geometry after collision resolution
    Scheduled(Placement),
    Removed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub task_id: TaskId,
    pub source: InputSource,
    /// Sizes the drop preview only
    pub payload_duration_slots: u32,
    pub hovered: Option<DropTarget>,
}

impl DragContext {
    pub fn from_task(task: &Task, source: InputSource) -> Self {
        Self {
            task_id: task.id.clone(),
            source,
            payload_duration_slots: task.drag_duration_slots(),
            hovered: None,
        }
    }

    pub fn preview(&self) -> Option<DropPreview> {
        match self.hovered? {
            DropTarget::Section {
                section,
                offset_slots,
            } => Some(DropPreview {
                section,
                start_index: resolve_drop_index(section, offset_slots),
                duration_slots: self.payload_duration_slots,
            }),
            DropTarget::Backlog(_) | DropTarget::Delete => None,
        }
    }
}
