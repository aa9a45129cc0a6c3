mod app;
pub mod date_range_picker;
pub(crate) mod palette;

pub use app::BookingApp;
