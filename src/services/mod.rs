// Service module exports

pub mod api;
pub mod availability;
pub mod calendar_grid;
pub mod session;
pub mod settings;
pub mod summary;
