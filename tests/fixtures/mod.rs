// Test fixtures - reusable booking data
// Provides consistent dates and intervals across all test files
#![allow(dead_code)]

use chrono::NaiveDate;
use wedding_booking::models::booked_interval::{BookedInterval, ItemType, RawBookedInterval};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// A day in June 2024
    pub fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    /// The earliest selectable day in most scenarios
    pub fn min_date() -> NaiveDate {
        june(1)
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample booked intervals
pub mod intervals {
    use super::dates::june;
    use super::*;

    /// Rose Garden Hall, June 10-12
    pub fn rose_garden() -> BookedInterval {
        BookedInterval::new("Rose Garden Hall", ItemType::Venue, june(10), june(12))
    }

    /// Lakeside Studio, June 20 only
    pub fn lakeside_studio() -> BookedInterval {
        BookedInterval::new("Lakeside Studio", ItemType::Studio, june(20), june(20))
            .with_color("#4DB6AC")
    }

    /// Backend shape of the Rose Garden booking, with times of day attached
    pub fn rose_garden_raw() -> RawBookedInterval {
        RawBookedInterval {
            booked_from: "2024-06-10T15:30:00.000Z".to_string(),
            booked_till: "2024-06-12T08:00:00.000Z".to_string(),
            item_name: "Rose Garden Hall".to_string(),
            item_type: ItemType::Venue,
            color: None,
        }
    }

    /// An entry the backend sent with a garbage date
    pub fn broken_raw() -> RawBookedInterval {
        RawBookedInterval {
            booked_from: "next tuesday".to_string(),
            booked_till: "2024-06-18".to_string(),
            item_name: "Broken Entry".to_string(),
            item_type: ItemType::Other,
            color: None,
        }
    }
}
