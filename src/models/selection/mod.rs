// Selection module
// Start/end pick sequence of the date range picker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date::to_iso_utc_midnight;

/// Read-only view of the current pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SelectionRange {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Selection progress across clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Empty,
    StartPicked {
        start: NaiveDate,
    },
    RangeComplete {
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl SelectionState {
    /// Apply a click on `date` and return the new state.
    ///
    /// A click before the current start restarts the pick; any click after a
    /// completed range begins a new one.
    pub fn click(self, date: NaiveDate) -> Self {
        match self {
            SelectionState::Empty => SelectionState::StartPicked { start: date },
            SelectionState::StartPicked { start } if date >= start => {
                SelectionState::RangeComplete { start, end: date }
            }
            SelectionState::StartPicked { .. } => SelectionState::StartPicked { start: date },
            SelectionState::RangeComplete { .. } => SelectionState::StartPicked { start: date },
        }
    }

    pub fn reset(&mut self) {
        *self = SelectionState::Empty;
    }

    pub fn range(&self) -> SelectionRange {
        match *self {
            SelectionState::Empty => SelectionRange::default(),
            SelectionState::StartPicked { start } => SelectionRange {
                start: Some(start),
                end: None,
            },
            SelectionState::RangeComplete { start, end } => SelectionRange {
                start: Some(start),
                end: Some(end),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SelectionState::RangeComplete { .. })
    }

    /// The confirmed pair, available only once both ends are picked
    pub fn confirmed(&self) -> Option<ConfirmedRange> {
        match *self {
            SelectionState::RangeComplete { start, end } => Some(ConfirmedRange::new(start, end)),
            _ => None,
        }
    }
}

/// `{from, till}` pair handed to the caller on confirm.
///
/// Both values are the UTC midnight instant of the picked calendar day, so a
/// booking made from any time zone refers to the same days on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmedRange {
    pub from: String,
    pub till: String,
}

impl ConfirmedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            from: to_iso_utc_midnight(start),
            till: to_iso_utc_midnight(end),
        }
    }

    /// Calendar days of the pair, if both strings are in the emitted format
    pub fn days(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = NaiveDate::parse_from_str(self.from.get(..10)?, "%Y-%m-%d").ok()?;
        let till = NaiveDate::parse_from_str(self.till.get(..10)?, "%Y-%m-%d").ok()?;
        Some((from, till))
    }
}
