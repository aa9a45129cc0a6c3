// Availability module
// Classifies calendar days against booked intervals and the current pick

use chrono::NaiveDate;

use crate::models::booked_interval::{BookedInterval, RawBookedInterval, ResolvedIntervals};
use crate::models::selection::SelectionRange;
use crate::models::settings::InvalidIntervalPolicy;

/// Visual state of a single day, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayState {
    Booked,
    Past,
    Selected,
    InRange,
    Available,
}

pub fn is_booked(date: NaiveDate, intervals: &[BookedInterval]) -> bool {
    intervals.iter().any(|interval| interval.contains(date))
}

pub fn is_past(date: NaiveDate, min_date: NaiveDate) -> bool {
    date < min_date
}

pub fn is_selected(date: NaiveDate, selection: &SelectionRange) -> bool {
    selection.start == Some(date) || selection.end == Some(date)
}

/// Strictly between a complete selection's ends
pub fn is_in_range(date: NaiveDate, selection: &SelectionRange) -> bool {
    match (selection.start, selection.end) {
        (Some(start), Some(end)) => start < date && date < end,
        _ => false,
    }
}

/// Booked intervals together with the picker's mode and lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    intervals: Vec<BookedInterval>,
    min_date: NaiveDate,
    read_only: bool,
    /// Set when intervals were rejected and the policy says to block
    block_all: bool,
}

impl Availability {
    pub fn new(intervals: Vec<BookedInterval>, min_date: NaiveDate, read_only: bool) -> Self {
        Self {
            intervals,
            min_date,
            read_only,
            block_all: false,
        }
    }

    /// Build from resolved backend data, applying `policy` to any rejected entries.
    pub fn from_resolved(
        resolved: ResolvedIntervals,
        policy: InvalidIntervalPolicy,
        min_date: NaiveDate,
        read_only: bool,
    ) -> Self {
        let block_all = policy == InvalidIntervalPolicy::Block && !resolved.rejected.is_empty();
        if block_all {
            log::warn!(
                "{} booked interval(s) could not be read; blocking every date",
                resolved.rejected.len()
            );
        }

        Self {
            intervals: resolved.intervals,
            min_date,
            read_only,
            block_all,
        }
    }

    pub fn from_raw(
        raw: &[RawBookedInterval],
        policy: InvalidIntervalPolicy,
        min_date: NaiveDate,
        read_only: bool,
    ) -> Self {
        let resolved = crate::models::booked_interval::resolve_all(raw);
        Self::from_resolved(resolved, policy, min_date, read_only)
    }

    pub fn intervals(&self) -> &[BookedInterval] {
        &self.intervals
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_blocking_all(&self) -> bool {
        self.block_all
    }

    pub fn is_booked(&self, date: NaiveDate) -> bool {
        self.block_all || is_booked(date, &self.intervals)
    }

    pub fn is_past(&self, date: NaiveDate) -> bool {
        is_past(date, self.min_date)
    }

    /// Read-only calendars never disable a day.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        !self.read_only && (self.is_booked(date) || self.is_past(date))
    }

    pub fn classify(&self, date: NaiveDate, selection: &SelectionRange) -> DayState {
        if self.is_booked(date) {
            DayState::Booked
        } else if self.is_past(date) {
            DayState::Past
        } else if is_selected(date, selection) {
            DayState::Selected
        } else if is_in_range(date, selection) {
            DayState::InRange
        } else {
            DayState::Available
        }
    }

    /// Intervals sharing at least one day with `[from, till]`.
    pub fn conflicts(&self, from: NaiveDate, till: NaiveDate) -> Vec<&BookedInterval> {
        self.intervals
            .iter()
            .filter(|interval| interval.overlaps(from, till))
            .collect()
    }

    /// The intervals touching a given day, for tooltips
    pub fn bookings_on(&self, date: NaiveDate) -> Vec<&BookedInterval> {
        self.intervals
            .iter()
            .filter(|interval| interval.contains(date))
            .collect()
    }
}
