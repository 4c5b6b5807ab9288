// Service module exports

pub mod config;
pub mod database;
pub mod export;
pub mod interaction;
pub mod persistence;
pub mod schedule;
pub mod task;
