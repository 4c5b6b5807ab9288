//! Placement resolver.
//!
//! Turns raw drop and resize gestures into grid-aligned geometry. Inputs are
//! never rejected: offsets are snapped to whole slots (`.5` rounds up) and
//! clamped so the result always lies inside one section.

use crate::models::grid::{section_of, Section, DAY_SLOTS, SECTION_SLOTS};

/// Round a fractional slot offset to the nearest slot, halves rounding up.
///
/// Non-finite input snaps to slot 0.
pub fn snap_to_slot(offset_slots: f64) -> f64 {
    let snapped = (offset_slots + 0.5).floor();
    if snapped.is_nan() {
        0.0
    } else {
        snapped
    }
}

/// Convert a pointer offset in pixels into fractional slots.
pub fn pixels_to_slots(offset_px: f64, slot_height_px: f64) -> f64 {
    if slot_height_px > 0.0 {
        offset_px / slot_height_px
    } else {
        0.0
    }
}

/// Absolute start slot for a drop at `offset_slots` below the top of `section`.
///
/// The result is always in `[section.start(), section.start() + 24)`; a drop
/// never spills into the neighbouring section.
pub fn resolve_drop_index(section: Section, offset_slots: f64) -> u32 {
    let relative = snap_to_slot(offset_slots).clamp(0.0, f64::from(SECTION_SLOTS - 1));
    section.start() + relative as u32
}

/// Duration for a resize of a task starting at `start_index` to a proposed
/// height of `proposed_slots`.
///
/// At least one slot, at most the room left before the end of the task's
/// section.
pub fn resolve_duration(start_index: u32, proposed_slots: f64) -> u32 {
    let section_end = section_of(start_index)
        .map(Section::end)
        .unwrap_or(DAY_SLOTS);
    let max_duration = section_end.saturating_sub(start_index).max(1);

    let snapped = snap_to_slot(proposed_slots).max(1.0);
    (snapped.min(f64::from(max_duration)) as u32).clamp(1, max_duration)
}
