// MindFrame Library
// Day planner engine: time grid, task store, placement and collision rules

pub mod models;
pub mod services;
