//! Collision resolver.
//!
//! Repairs overlapping scheduled tasks with one greedy sweep per section.
//! Tasks are ordered by `(start, title, id)`; a cursor walks the section from
//! its first slot, pushing any task that starts before the cursor down to it
//! and truncating whatever would run past the section end. Sections never
//! interact: a task is compressed, never moved to another section or dropped.

use crate::models::grid::{Section, SECTION_SLOTS};
use crate::models::task::{Task, TaskId};

/// Resolve every section. Returns the ids of tasks whose geometry changed.
pub fn resolve_collisions(tasks: &mut [Task]) -> Vec<TaskId> {
    Section::ALL
        .into_iter()
        .flat_map(|section| resolve_section(tasks, section))
        .collect()
}

/// Resolve one section. Returns the ids of tasks whose geometry changed.
pub fn resolve_section(tasks: &mut [Task], section: Section) -> Vec<TaskId> {
    let mut order: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.section() == Some(section))
        .map(|(idx, _)| idx)
        .collect();

    if order.is_empty() {
        return Vec::new();
    }

    order.sort_by(|&a, &b| {
        let (ta, tb) = (&tasks[a], &tasks[b]);
        let sa = ta.placement().map(|p| p.start_index);
        let sb = tb.placement().map(|p| p.start_index);
        sa.cmp(&sb)
            .then_with(|| ta.title.cmp(&tb.title))
            .then_with(|| ta.id.cmp(&tb.id))
    });

    let before: Vec<_> = order.iter().map(|&idx| tasks[idx].placement()).collect();

    if order.len() > SECTION_SLOTS as usize {
        pack_saturated(tasks, &order, section);
    } else {
        sweep(tasks, &order, section);
        if order
            .iter()
            .any(|&idx| tasks[idx].placement().map(|p| p.start_index) >= Some(section.end()))
        {
            backfill(tasks, &order, section);
        }
    }

    let changed: Vec<TaskId> = order
        .iter()
        .zip(before)
        .filter(|(idx, before)| tasks[**idx].placement() != *before)
        .map(|(&idx, _)| tasks[idx].id.clone())
        .collect();

    if !changed.is_empty() {
        log::debug!(
            "Resolved {} collision(s) in {} section",
            changed.len(),
            section
        );
    }
    changed
}

fn sweep(tasks: &mut [Task], order: &[usize], section: Section) {
    let section_end = section.end();
    let mut cursor = section.start();

    for &idx in order {
        let Some(placement) = tasks[idx].placement_mut() else {
            continue;
        };

        if placement.start_index < cursor {
            placement.start_index = cursor;
        }
        cursor = placement.end_index();

        if cursor > section_end {
            placement.duration_slots = section_end.saturating_sub(placement.start_index).max(1);
            cursor = section_end;
        }
    }
}

// Only reached when the section is full before the last tasks get a slot:
// the sweep has pushed them onto the section end. Walk back from the end,
// compressing predecessors so every task keeps at least one slot. With at
// most one task per slot, `limit` stays above the section start while any
// task is left to place.
fn backfill(tasks: &mut [Task], order: &[usize], section: Section) {
    let mut limit = section.end();

    for &idx in order.iter().rev() {
        let Some(placement) = tasks[idx].placement_mut() else {
            continue;
        };

        if placement.end_index() <= limit {
            break;
        }

        if placement.start_index < limit {
            placement.duration_slots = limit - placement.start_index;
        } else {
            placement.duration_slots = 1;
            placement.start_index = limit.saturating_sub(1).max(section.start());
        }
        limit = placement.start_index;
    }
}

// More tasks than slots: every task gets one slot in sorted order and the
// surplus shares the section's first slot.
fn pack_saturated(tasks: &mut [Task], order: &[usize], section: Section) {
    let surplus = order.len() - SECTION_SLOTS as usize;
    log::warn!(
        "{} section holds {} more task(s) than slots; they share its first slot",
        section.label(),
        surplus
    );

    for (rank, &idx) in order.iter().enumerate() {
        if let Some(placement) = tasks[idx].placement_mut() {
            placement.start_index = section.start() + rank.saturating_sub(surplus) as u32;
            placement.duration_slots = 1;
        }
    }
}
