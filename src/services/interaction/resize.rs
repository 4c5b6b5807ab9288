// Task resize
//
// Only the bottom edge of a scheduled block is draggable: the start slot stays
// put and the duration follows the pointer, snapped and clamped to the section.

use crate::models::task::{Placement, Task, TaskId};
use crate::services::schedule::resolve_duration;

/// Context for an active resize gesture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeContext {
    pub task_id: TaskId,
    /// Geometry when the gesture started
    pub original: Placement,
    /// Snapped duration from the latest pointer move
    pub proposed_slots: u32,
}

impl ResizeContext {
    /// `None` for backlog tasks, which have no edge to drag
    pub fn from_task(task: &Task) -> Option<Self> {
        let original = task.placement()?;
        Some(Self {
            task_id: task.id.clone(),
            original,
            proposed_slots: original.duration_slots,
        })
    }

    /// Track a new proposed height in fractional slots; returns the snapped duration
    pub fn update(&mut self, height_slots: f64) -> u32 {
        self.proposed_slots = resolve_duration(self.original.start_index, height_slots);
        self.proposed_slots
    }

    /// Whether committing would change the stored duration
    pub fn is_changed(&self) -> bool {
        self.proposed_slots != self.original.duration_slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{BacklogList, Priority, TaskPatch};

    #[test]
    fn test_backlog_task_cannot_resize() {
        let task = Task::new("Idea", Priority::Low, BacklogList::Today).unwrap();
        assert!(ResizeContext::from_task(&task).is_none());
    }

    #[test]
    fn test_update_clamps_to_section() {
        let mut task = Task::new("Deep work", Priority::High, BacklogList::Today).unwrap();
        task.apply(&TaskPatch::schedule(66, 4));
        let mut ctx = ResizeContext::from_task(&task).unwrap();

        assert_eq!(ctx.update(2.4), 2);
        assert!(ctx.is_changed());
        assert_eq!(ctx.update(20.0), 6);
        assert_eq!(ctx.original, Placement::new(66, 4));
        assert_eq!(ctx.update(4.0), 4);
        assert!(!ctx.is_changed());
    }
}
