// Module exports for models

pub mod grid;
pub mod settings;
pub mod task;
