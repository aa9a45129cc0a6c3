// Booked interval module
// A reserved date range of a venue, studio or other marketplace item

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::parse_calendar_day;

pub const DEFAULT_VENUE_COLOR: &str = "#E57373";
pub const DEFAULT_STUDIO_COLOR: &str = "#64B5F6";
pub const DEFAULT_OTHER_COLOR: &str = "#FFB74D";

/// Kind of marketplace item a booking belongs to. Only drives colour and icon choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Venue,
    Studio,
    #[default]
    #[serde(other)]
    Other,
}

impl ItemType {
    /// Default palette entry used when an interval carries no colour of its own
    pub fn default_color(&self) -> &'static str {
        match self {
            ItemType::Venue => DEFAULT_VENUE_COLOR,
            ItemType::Studio => DEFAULT_STUDIO_COLOR,
            ItemType::Other => DEFAULT_OTHER_COLOR,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ItemType::Venue => "🏛",
            ItemType::Studio => "📷",
            ItemType::Other => "📌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Venue => "Venue",
            ItemType::Studio => "Studio",
            ItemType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("invalid {field} date '{value}' for '{item_name}'")]
    InvalidDate {
        field: &'static str,
        value: String,
        item_name: String,
    },
    #[error("booking for '{item_name}' ends on {till} before it starts on {from}")]
    Reversed {
        from: NaiveDate,
        till: NaiveDate,
        item_name: String,
    },
}

/// A booked date range with inclusive bounds, in calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub booked_from: NaiveDate,
    pub booked_till: NaiveDate,
    pub item_name: String,
    pub item_type: ItemType,
    pub color: Option<String>,
}

impl BookedInterval {
    pub fn new(
        item_name: impl Into<String>,
        item_type: ItemType,
        booked_from: NaiveDate,
        booked_till: NaiveDate,
    ) -> Self {
        Self {
            booked_from,
            booked_till,
            item_name: item_name.into(),
            item_type,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// True if `date` lies within `[booked_from, booked_till]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.booked_from <= date && date <= self.booked_till
    }

    /// True if this interval shares at least one day with `[from, till]`.
    pub fn overlaps(&self, from: NaiveDate, till: NaiveDate) -> bool {
        self.booked_from <= till && from <= self.booked_till
    }

    /// Number of booked days, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.booked_till - self.booked_from).num_days() + 1
    }

    /// The interval's own colour, or the palette default for its item type
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| is_hex_color(c))
            .unwrap_or_else(|| self.item_type.default_color())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.booked_till < self.booked_from {
            return Err(format!(
                "Booking for '{}' ends before it starts",
                self.item_name
            ));
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }
}

/// Interval exactly as the backend sends it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookedInterval {
    pub booked_from: String,
    pub booked_till: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub color: Option<String>,
}

impl RawBookedInterval {
    /// Convert both bounds into calendar days. Timestamps count by their UTC date.
    pub fn resolve(&self) -> Result<BookedInterval, IntervalError> {
        let booked_from = parse_calendar_day(&self.booked_from).ok_or_else(|| {
            IntervalError::InvalidDate {
                field: "bookedFrom",
                value: self.booked_from.clone(),
                item_name: self.item_name.clone(),
            }
        })?;
        let booked_till = parse_calendar_day(&self.booked_till).ok_or_else(|| {
            IntervalError::InvalidDate {
                field: "bookedTill",
                value: self.booked_till.clone(),
                item_name: self.item_name.clone(),
            }
        })?;

        if booked_till < booked_from {
            return Err(IntervalError::Reversed {
                from: booked_from,
                till: booked_till,
                item_name: self.item_name.clone(),
            });
        }

        Ok(BookedInterval {
            booked_from,
            booked_till,
            item_name: self.item_name.clone(),
            item_type: self.item_type,
            color: self.color.clone().filter(|c| !c.trim().is_empty()),
        })
    }
}

/// Intervals resolved from a backend list, plus the ones that could not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedIntervals {
    pub intervals: Vec<BookedInterval>,
    pub rejected: Vec<IntervalError>,
}

pub fn resolve_all(raw: &[RawBookedInterval]) -> ResolvedIntervals {
    let mut resolved = ResolvedIntervals::default();
    for entry in raw {
        match entry.resolve() {
            Ok(interval) => resolved.intervals.push(interval),
            Err(err) => {
                log::warn!("Skipping booked interval: {}", err);
                resolved.rejected.push(err);
            }
        }
    }
    resolved
}

fn is_hex_color(color: &str) -> bool {
    color.starts_with('#')
        && (color.len() == 7 || color.len() == 4)
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
