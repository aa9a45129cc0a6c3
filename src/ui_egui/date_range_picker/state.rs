//! Picker state: options, availability, the pick in progress and the shown month.
//!
//! Kept free of egui so the whole interaction can be driven from tests.

use chrono::NaiveDate;

use crate::models::booked_interval::BookedInterval;
use crate::models::selection::{ConfirmedRange, SelectionRange, SelectionState};
use crate::services::availability::Availability;
use crate::services::calendar_grid::{DisplayedMonth, MonthGrid};
use crate::services::summary::BookingSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    /// Earliest selectable day; `None` means today
    pub min_date: Option<NaiveDate>,
    pub read_only: bool,
    pub title: String,
    /// Distinguishes several pickers in one egui context
    pub id_salt: String,
    pub show_legend: bool,
    pub week_starts_on_monday: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            min_date: None,
            read_only: false,
            title: "Select dates".to_string(),
            id_salt: "date_range_picker".to_string(),
            show_legend: true,
            week_starts_on_monday: false,
        }
    }
}

impl PickerOptions {
    pub fn read_only(title: impl Into<String>) -> Self {
        Self {
            read_only: true,
            title: title.into(),
            ..Self::default()
        }
    }
}

/// What the parent should do after a frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateRangePickerAction {
    #[default]
    None,
    Confirmed(ConfirmedRange),
    Closed,
}

#[derive(Debug, Clone)]
pub struct DateRangePickerState {
    options: PickerOptions,
    availability: Availability,
    selection: SelectionState,
    displayed: DisplayedMonth,
    is_open: bool,
}

impl DateRangePickerState {
    /// A freshly opened picker showing the month of its earliest selectable day
    pub fn new(intervals: Vec<BookedInterval>, options: PickerOptions, today: NaiveDate) -> Self {
        let min_date = options.min_date.unwrap_or(today);
        let availability = Availability::new(intervals, min_date, options.read_only);
        Self::from_availability(availability, options)
    }

    /// Use an already-built `Availability`; its mode wins over `options.read_only`.
    pub fn from_availability(availability: Availability, mut options: PickerOptions) -> Self {
        options.read_only = availability.is_read_only();
        options.min_date = Some(availability.min_date());
        let displayed = DisplayedMonth::containing(availability.min_date());
        Self {
            options,
            availability,
            selection: SelectionState::Empty,
            displayed,
            is_open: true,
        }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_read_only(&self) -> bool {
        self.options.read_only
    }

    /// Reopen with an empty selection
    pub fn open(&mut self) {
        self.selection.reset();
        self.is_open = true;
    }

    /// Dismiss without emitting anything
    pub fn close(&mut self) {
        self.selection.reset();
        self.is_open = false;
    }

    pub fn cancel(&mut self) {
        self.close();
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection.range()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection
    }

    /// Apply a click. Returns false when the click was ignored.
    pub fn click(&mut self, date: NaiveDate) -> bool {
        if self.options.read_only || !self.is_open || self.availability.is_disabled(date) {
            return false;
        }
        self.selection = self.selection.click(date);
        true
    }

    pub fn can_confirm(&self) -> bool {
        !self.options.read_only && self.selection.is_complete()
    }

    /// Emit the range and close. A no-op unless both ends are picked.
    pub fn confirm(&mut self) -> Option<ConfirmedRange> {
        if !self.can_confirm() {
            return None;
        }
        let confirmed = self.selection.confirmed()?;
        log::debug!("Date range confirmed: {} .. {}", confirmed.from, confirmed.till);
        self.close();
        Some(confirmed)
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed
    }

    pub fn next_month(&mut self) {
        self.displayed = self.displayed.next();
    }

    pub fn previous_month(&mut self) {
        self.displayed = self.displayed.previous();
    }

    pub fn show_month(&mut self, month: DisplayedMonth) {
        self.displayed = month;
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(
            self.displayed,
            self.options.week_starts_on_monday,
            &self.availability,
            &self.selection.range(),
        )
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary::from_intervals(self.availability.intervals())
    }
}
