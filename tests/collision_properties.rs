// Property tests for the collision resolver
mod fixtures;

use mindframe::models::task::Task;
use mindframe::services::schedule::{resolve_collisions, resolve_drop_index};
use mindframe::models::grid::Section;
use proptest::prelude::*;

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    arb_day(24)
}

fn arb_day(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((0u32..96, 1u32..40, "[a-e]{1,3}"), 0..=max_tasks).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration, title))| {
                fixtures::scheduled(&format!("t-{i:03}"), &title, start, duration)
            })
            .collect()
    })
}

proptest! {
    /// No two tasks in a section overlap and none spills past its section
    #[test]
    fn prop_resolution_yields_valid_layout(mut tasks in arb_tasks()) {
        resolve_collisions(&mut tasks);
        fixtures::assert_valid_layout(&tasks);
    }

    /// A second pass changes nothing
    #[test]
    fn prop_resolution_is_idempotent(mut tasks in arb_tasks()) {
        resolve_collisions(&mut tasks);
        let once = tasks.clone();

        let changed = resolve_collisions(&mut tasks);
        prop_assert!(changed.is_empty());
        prop_assert_eq!(tasks, once);
    }

    /// Tasks keep their section and their number
    #[test]
    fn prop_tasks_stay_in_section(mut tasks in arb_tasks()) {
        let before: Vec<_> = tasks.iter().map(|t| (t.id.clone(), t.section())).collect();
        resolve_collisions(&mut tasks);
        let after: Vec<_> = tasks.iter().map(|t| (t.id.clone(), t.section())).collect();
        prop_assert_eq!(before, after);
    }

    /// Crowded days still settle in one pass, keep every task in its section
    /// and give each at least one slot
    #[test]
    fn prop_crowded_day_is_stable(mut tasks in arb_day(160)) {
        let sections: Vec<_> = tasks.iter().map(|t| t.section()).collect();
        resolve_collisions(&mut tasks);

        for (task, section) in tasks.iter().zip(&sections) {
            let placement = task.placement().unwrap();
            prop_assert_eq!(task.section(), *section);
            prop_assert!(placement.duration_slots >= 1);
            prop_assert!(placement.end_index() <= section.unwrap().end());
        }

        let once = tasks.clone();
        prop_assert!(resolve_collisions(&mut tasks).is_empty());
        prop_assert_eq!(tasks, once);
    }

    /// Drops land inside the targeted section for any offset
    #[test]
    fn prop_drop_stays_in_section(offset in -1.0e6f64..1.0e6, section_idx in 0usize..4) {
        let section = Section::ALL[section_idx];
        prop_assert!(section.contains(resolve_drop_index(section, offset)));
    }
}
