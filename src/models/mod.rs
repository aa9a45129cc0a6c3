// Module exports for models

pub mod booked_interval;
pub mod catalog;
pub mod selection;
pub mod session;
pub mod settings;
