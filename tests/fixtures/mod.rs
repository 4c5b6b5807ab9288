// Test fixtures - reusable task data shared by the integration tests
#![allow(dead_code)]

use mindframe::models::grid::Section;
use mindframe::models::task::{BacklogList, Location, Placement, Priority, Task, TaskId, TaskPatch};
use mindframe::services::task::TaskStore;

/// Scheduled task with a fixed id and raw, unclamped geometry
pub fn scheduled(id: &str, title: &str, start: u32, duration: u32) -> Task {
    let mut task = Task::new(title, Priority::Medium, BacklogList::Today).unwrap();
    task.id = TaskId::from(id);
    task.location = Location::Scheduled(Placement {
        start_index: start,
        duration_slots: duration,
    });
    task
}

/// Store holding a small morning routine
pub fn morning_store() -> (TaskStore, Vec<TaskId>) {
    let mut store = TaskStore::in_memory();
    let mut ids = Vec::new();
    for (title, start, duration) in [("Coffee", 26, 1), ("Emails", 28, 4), ("Standup", 36, 2)] {
        let task = store.create(title, Priority::Medium, BacklogList::Today).unwrap();
        store.patch(&task.id, TaskPatch::schedule(start, duration));
        ids.push(task.id);
    }
    (store, ids)
}

/// Panics if any section holds overlapping or spilling tasks
pub fn assert_valid_layout(tasks: &[Task]) {
    for section in Section::ALL {
        let mut placements: Vec<_> = tasks
            .iter()
            .filter(|t| t.section() == Some(section))
            .filter_map(Task::placement)
            .collect();
        placements.sort_by_key(|p| p.start_index);

        for p in &placements {
            assert!(p.duration_slots >= 1, "{p:?} has no duration");
            assert!(
                p.end_index() <= section.end(),
                "{p:?} spills out of {section}"
            );
        }
        for pair in placements.windows(2) {
            assert!(!pair[0].overlaps(&pair[1]), "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }
}
