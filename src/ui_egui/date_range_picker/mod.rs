//! Date range picker with booked-day highlighting.
//!
//! Used interactively on venue and studio pages, and read-only when an admin
//! inspects an order's bookings.

mod legend;
mod render;
mod state;

pub use legend::render_booking_legend;
pub use render::{render_booking_calendar, render_date_range_picker};
pub use state::{DateRangePickerAction, DateRangePickerState, PickerOptions};
