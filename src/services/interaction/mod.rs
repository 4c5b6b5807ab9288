//! Drag/resize coordinator.
//!
//! One state machine receives gesture events from every input source and
//! is the only path from a gesture to a store mutation. A physical gesture
//! commits at most once: the first drop ends it, and any drop that arrives
//! afterwards finds the machine idle and is ignored.

use crate::models::grid::Section;
use crate::models::settings::GridConfig;
use crate::models::task::{Placement, TaskId, TaskPatch};
use crate::services::schedule::{pixels_to_slots, resolve_drop_index};
use crate::services::task::TaskStore;

pub mod drag;
pub mod resize;

pub use drag::{DragContext, DropOutcome, DropPreview, DropTarget, InputSource};
pub use resize::ResizeContext;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragContext),
    Resizing(ResizeContext),
}

pub struct InteractionCoordinator {
    state: InteractionState,
    slot_height_px: f64,
}

impl Default for InteractionCoordinator {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

impl InteractionCoordinator {
    pub fn new(grid: &GridConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            slot_height_px: grid.slot_height_px,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Convert a pointer offset in pixels into a section drop target.
    pub fn section_target(&self, section: Section, offset_px: f64) -> DropTarget {
        DropTarget::Section {
            section,
            offset_slots: pixels_to_slots(offset_px, self.slot_height_px),
        }
    }

    /// Start dragging `id`.
    ///
    /// A second start for the task already in flight (the other input source
    /// reporting the same gesture) joins it. Any other unfinished gesture is
    /// abandoned without touching the store. Returns `false` for unknown ids.
    pub fn begin_drag(&mut self, store: &TaskStore, id: &TaskId, source: InputSource) -> bool {
        if let InteractionState::Dragging(ctx) = &self.state {
            if &ctx.task_id == id {
                log::debug!(
                    "Drag of {} from {} joined gesture started by {}",
                    id,
                    source,
                    ctx.source
                );
                return true;
            }
        }

        let Some(task) = store.get(id) else {
            log::debug!("Ignoring drag of unknown task {}", id);
            return false;
        };

        self.abandon_active();
        log::debug!("Dragging {} ({})", id, source);
        self.state = InteractionState::Dragging(DragContext::from_task(task, source));
        true
    }

    /// Record what the drag is over. Returns the ghost for section targets.
    pub fn hover(&mut self, target: Option<DropTarget>) -> Option<DropPreview> {
        match &mut self.state {
            InteractionState::Dragging(ctx) => {
                ctx.hovered = target;
                ctx.preview()
            }
            _ => None,
        }
    }

    /// Current ghost, if a drag hovers a section
    pub fn preview(&self) -> Option<DropPreview> {
        match &self.state {
            InteractionState::Dragging(ctx) => ctx.preview(),
            _ => None,
        }
    }

    /// Finish the drag over `target` and commit it.
    ///
    /// `None` as target (released outside any drop zone) ends the gesture
    /// without a mutation. A drop while no drag is active is ignored.
    pub fn drop(
        &mut self,
        store: &mut TaskStore,
        target: Option<DropTarget>,
        source: InputSource,
    ) -> Option<DropOutcome> {
        let ctx = match std::mem::take(&mut self.state) {
            InteractionState::Dragging(ctx) => ctx,
            other => {
                log::debug!("Ignoring {} drop with no drag in progress", source);
                self.state = other;
                return None;
            }
        };

        let Some(target) = target else {
            log::debug!("Drag of {} released outside any target", ctx.task_id);
            return None;
        };

        let id = &ctx.task_id;
        match target {
            DropTarget::Backlog(list) => store
                .patch(id, TaskPatch::to_backlog(list))
                .then_some(DropOutcome::Backlogged(list)),
            DropTarget::Section {
                section,
                offset_slots,
            } => {
                let duration = store.get(id)?.drag_duration_slots();
                let start = resolve_drop_index(section, offset_slots);
                if !store.patch(id, TaskPatch::schedule(start, duration)) {
                    return None;
                }
                let placement = store.get(id)?.placement()?;
                log::debug!(
                    "Dropped {} at slot {} ({} section)",
                    id,
                    placement.start_index,
                    section
                );
                Some(DropOutcome::Scheduled(placement))
            }
            DropTarget::Delete => store.remove(id).then_some(DropOutcome::Removed),
        }
    }

    /// Abort whatever gesture is active. Nothing in the store changes.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        self.abandon_active();
        was_active
    }

    /// Start resizing a scheduled task. Backlog tasks and unknown ids are refused.
    pub fn begin_resize(&mut self, store: &TaskStore, id: &TaskId) -> bool {
        let Some(ctx) = store.get(id).and_then(ResizeContext::from_task) else {
            log::debug!("Ignoring resize of {}: not a scheduled task", id);
            return false;
        };

        self.abandon_active();
        self.state = InteractionState::Resizing(ctx);
        true
    }

    /// Track the resize handle at `height_slots`; returns the snapped duration.
    pub fn resize_to(&mut self, height_slots: f64) -> Option<u32> {
        match &mut self.state {
            InteractionState::Resizing(ctx) => Some(ctx.update(height_slots)),
            _ => None,
        }
    }

    /// Pixel variant of [`Self::resize_to`]
    pub fn resize_to_pixels(&mut self, height_px: f64) -> Option<u32> {
        self.resize_to(pixels_to_slots(height_px, self.slot_height_px))
    }

    /// Release the resize handle and commit the last snapped duration.
    /// An unchanged height returns the original geometry without a commit.
    pub fn finish_resize(&mut self, store: &mut TaskStore) -> Option<Placement> {
        let ctx = match std::mem::take(&mut self.state) {
            InteractionState::Resizing(ctx) => ctx,
            other => {
                self.state = other;
                return None;
            }
        };

        if !ctx.is_changed() {
            log::debug!("Resize of {} left its duration unchanged", ctx.task_id);
            return Some(ctx.original);
        }
        if !store.patch(&ctx.task_id, TaskPatch::new().duration_slots(ctx.proposed_slots)) {
            return None;
        }
        store.get(&ctx.task_id)?.placement()
    }

    fn abandon_active(&mut self) {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => {}
            InteractionState::Dragging(ctx) => log::debug!("Abandoned drag of {}", ctx.task_id),
            InteractionState::Resizing(ctx) => log::debug!("Abandoned resize of {}", ctx.task_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{BacklogList, Priority, Task};
    use pretty_assertions::assert_eq;

    fn store_with(title: &str) -> (TaskStore, TaskId) {
        let mut store = TaskStore::in_memory();
        let task = store.create(title, Priority::Medium, BacklogList::Today).unwrap();
        (store, task.id)
    }

    fn morning(offset_slots: f64) -> Option<DropTarget> {
        Some(DropTarget::Section {
            section: Section::Morning,
            offset_slots,
        })
    }

    #[test]
    fn test_drop_on_section_schedules_with_default_duration() {
        let (mut store, id) = store_with("Standup");
        let mut coordinator = InteractionCoordinator::default();

        assert!(coordinator.begin_drag(&store, &id, InputSource::Pointer));
        let outcome = coordinator.drop(&mut store, morning(130.0), InputSource::Pointer);

        assert_eq!(outcome, Some(DropOutcome::Scheduled(Placement::new(47, 1))));
        assert!(coordinator.is_idle());
    }

    #[test]
    fn test_drop_keeps_existing_duration() {
        let (mut store, id) = store_with("Review");
        store.patch(&id, TaskPatch::schedule(80, 6));
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_drag(&store, &id, InputSource::Native);
        let outcome = coordinator.drop(&mut store, morning(2.0), InputSource::Native);

        assert_eq!(outcome, Some(DropOutcome::Scheduled(Placement::new(26, 6))));
    }

    #[test]
    fn test_two_sources_commit_once() {
        let (mut store, id) = store_with("Call mom");
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_drag(&store, &id, InputSource::Native);
        coordinator.begin_drag(&store, &id, InputSource::Pointer);
        let first = coordinator.drop(&mut store, morning(0.0), InputSource::Pointer);
        let revision = store.revision();
        let second = coordinator.drop(&mut store, morning(8.0), InputSource::Native);

        assert!(first.is_some());
        assert_eq!(second, None);
        assert_eq!(store.revision(), revision);
        assert_eq!(store.get(&id).unwrap().placement(), Some(Placement::new(24, 4)));
    }

    #[test]
    fn test_drop_on_backlog_clears_geometry() {
        let (mut store, id) = store_with("Shopping");
        store.patch(&id, TaskPatch::schedule(50, 4));
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_drag(&store, &id, InputSource::Pointer);
        let outcome = coordinator.drop(
            &mut store,
            Some(DropTarget::Backlog(BacklogList::Week)),
            InputSource::Pointer,
        );

        assert_eq!(outcome, Some(DropOutcome::Backlogged(BacklogList::Week)));
        let task = store.get(&id).unwrap();
        assert_eq!(task.placement(), None);
        assert_eq!(task.backlog_list(), Some(BacklogList::Week));
    }

    #[test]
    fn test_drop_on_delete_removes() {
        let (mut store, id) = store_with("Obsolete");
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_drag(&store, &id, InputSource::Pointer);
        let outcome = coordinator.drop(&mut store, Some(DropTarget::Delete), InputSource::Pointer);

        assert_eq!(outcome, Some(DropOutcome::Removed));
        assert!(store.is_empty());
    }

    #[test]
    fn test_release_outside_or_cancel_changes_nothing() {
        let (mut store, id) = store_with("Maybe");
        let before: Vec<Task> = store.all();
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_drag(&store, &id, InputSource::Pointer);
        coordinator.hover(morning(3.0));
        assert_eq!(coordinator.drop(&mut store, None, InputSource::Pointer), None);

        coordinator.begin_drag(&store, &id, InputSource::Pointer);
        assert!(coordinator.cancel());
        assert_eq!(coordinator.preview(), None);
        assert!(!coordinator.cancel());

        assert_eq!(store.all(), before);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_hover_preview_uses_payload() {
        let (store, id) = store_with("Read");
        let mut coordinator = InteractionCoordinator::default();
        coordinator.begin_drag(&store, &id, InputSource::Pointer);

        let target = coordinator.section_target(Section::Evening, 42.0);
        let preview = coordinator.hover(Some(target)).unwrap();

        assert_eq!(preview.start_index, 76);
        assert_eq!(preview.duration_slots, 4);
        assert_eq!(coordinator.hover(Some(DropTarget::Delete)), None);
    }

    #[test]
    fn test_unknown_task_cannot_drag() {
        let mut store = TaskStore::in_memory();
        let mut coordinator = InteractionCoordinator::default();
        let ghost = TaskId::from("t-ghost");

        assert!(!coordinator.begin_drag(&store, &ghost, InputSource::Native));
        assert_eq!(coordinator.drop(&mut store, morning(1.0), InputSource::Native), None);
    }

    #[test]
    fn test_resize_commits_and_resolves() {
        let (mut store, first) = store_with("First");
        let second = store.create("Second", Priority::Low, BacklogList::Today).unwrap().id;
        store.patch(&first, TaskPatch::schedule(48, 2));
        store.patch(&second, TaskPatch::schedule(50, 4));
        let mut coordinator = InteractionCoordinator::default();

        assert!(coordinator.begin_resize(&store, &first));
        assert_eq!(coordinator.resize_to_pixels(45.0), Some(4));
        let placement = coordinator.finish_resize(&mut store);

        assert_eq!(placement, Some(Placement::new(48, 4)));
        assert_eq!(store.get(&second).unwrap().placement(), Some(Placement::new(52, 4)));
        assert!(coordinator.is_idle());
    }

    #[test]
    fn test_resize_to_same_height_does_not_commit() {
        let (mut store, id) = store_with("Steady");
        store.patch(&id, TaskPatch::schedule(40, 3));
        let revision = store.revision();
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_resize(&store, &id);
        assert_eq!(coordinator.resize_to(3.2), Some(3));
        assert_eq!(coordinator.finish_resize(&mut store), Some(Placement::new(40, 3)));

        assert_eq!(store.revision(), revision);
        assert!(coordinator.is_idle());
    }

    #[test]
    fn test_resize_refuses_backlog_task() {
        let (mut store, id) = store_with("Loose");
        let mut coordinator = InteractionCoordinator::default();

        assert!(!coordinator.begin_resize(&store, &id));
        assert_eq!(coordinator.resize_to(3.0), None);
        assert_eq!(coordinator.finish_resize(&mut store), None);
    }

    #[test]
    fn test_drop_ignored_while_resizing() {
        let (mut store, id) = store_with("Block");
        store.patch(&id, TaskPatch::schedule(10, 4));
        let mut coordinator = InteractionCoordinator::default();

        coordinator.begin_resize(&store, &id);
        assert_eq!(coordinator.drop(&mut store, morning(0.0), InputSource::Native), None);
        assert!(matches!(coordinator.state(), InteractionState::Resizing(_)));
    }
}
