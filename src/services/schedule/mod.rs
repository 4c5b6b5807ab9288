//! Scheduling rules for the day grid: gesture-to-slot placement and
//! per-section collision repair.

pub mod collision;
pub mod placement;

pub use collision::{resolve_collisions, resolve_section};
pub use placement::{pixels_to_slots, resolve_drop_index, resolve_duration, snap_to_slot};
