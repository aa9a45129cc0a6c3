// Calendar grid module
// Month layout of day cells for the date range picker

use chrono::{Datelike, NaiveDate};

use crate::models::selection::SelectionRange;
use crate::services::availability::{Availability, DayState};
use crate::utils::date::days_in_month;

const SUNDAY_FIRST: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const MONDAY_FIRST: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// The month currently shown by a picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// e.g. "June 2024"
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub state: DayState,
    /// Click handling is attached only to these
    pub clickable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Blank => None,
        }
    }
}

/// Rows of seven cells for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: DisplayedMonth,
    pub week_starts_on_monday: bool,
    pub weeks: Vec<[GridCell; 7]>,
}

impl MonthGrid {
    pub fn build(
        month: DisplayedMonth,
        week_starts_on_monday: bool,
        availability: &Availability,
        selection: &SelectionRange,
    ) -> Self {
        let first = month.first_day();
        let offset = leading_blanks(first, week_starts_on_monday);

        let mut cells: Vec<GridCell> = vec![GridCell::Blank; offset];
        for day in first.iter_days().take(month.days_in_month() as usize) {
            cells.push(GridCell::Day(DayCell {
                date: day,
                state: availability.classify(day, selection),
                clickable: !availability.is_read_only() && !availability.is_disabled(day),
            }));
        }
        while cells.len() % 7 != 0 {
            cells.push(GridCell::Blank);
        }

        let weeks = cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [GridCell::Blank; 7];
                week.copy_from_slice(chunk);
                week
            })
            .collect();

        Self {
            month,
            week_starts_on_monday,
            weeks,
        }
    }

    pub fn weekday_headers(&self) -> [&'static str; 7] {
        if self.week_starts_on_monday {
            MONDAY_FIRST
        } else {
            SUNDAY_FIRST
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn day_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().filter_map(GridCell::day)
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.day_cells().find(|cell| cell.date == date)
    }
}

/// Blank cells before the 1st for the chosen week start
fn leading_blanks(first: NaiveDate, week_starts_on_monday: bool) -> usize {
    let weekday = first.weekday();
    if week_starts_on_monday {
        weekday.num_days_from_monday() as usize
    } else {
        weekday.num_days_from_sunday() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booked_interval::{BookedInterval, ItemType};
    use pretty_assertions::assert_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn june() -> DisplayedMonth {
        DisplayedMonth::new(2024, 6).unwrap()
    }

    fn availability(read_only: bool) -> Availability {
        Availability::new(
            vec![BookedInterval::new("Hall", ItemType::Venue, date(6, 10), date(6, 12))],
            date(6, 1),
            read_only,
        )
    }

    #[test]
    fn test_navigation_wraps_years() {
        let december = DisplayedMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), DisplayedMonth::new(2025, 1).unwrap());
        assert_eq!(december.next().previous(), december);

        let january = DisplayedMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), DisplayedMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(DisplayedMonth::new(2024, 0).is_none());
        assert!(DisplayedMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_title() {
        assert_eq!(june().title(), "June 2024");
    }

    #[test]
    fn test_june_2024_sunday_layout() {
        // June 1st 2024 is a Saturday
        let grid = MonthGrid::build(june(), false, &availability(false), &SelectionRange::default());
        assert_eq!(grid.weeks.len(), 6);
        assert!(grid.weeks[0][..6].iter().all(|c| *c == GridCell::Blank));
        assert_eq!(grid.weeks[0][6].day().unwrap().date, date(6, 1));
        assert_eq!(grid.day_cells().count(), 30);
        assert_eq!(grid.weekday_headers()[0], "Su");
    }

    #[test]
    fn test_june_2024_monday_layout() {
        let grid = MonthGrid::build(june(), true, &availability(false), &SelectionRange::default());
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][5].day().unwrap().date, date(6, 1));
        assert_eq!(grid.weeks[4][6].day().unwrap().date, date(6, 30));
        assert_eq!(grid.weekday_headers()[0], "Mo");
    }

    #[test]
    fn test_cells_carry_state_and_clickability() {
        let selection = SelectionRange {
            start: Some(date(6, 14)),
            end: Some(date(6, 16)),
        };
        let grid = MonthGrid::build(june(), false, &availability(false), &selection);

        let booked = grid.cell_for(date(6, 11)).unwrap();
        assert_eq!(booked.state, DayState::Booked);
        assert!(!booked.clickable);

        let start = grid.cell_for(date(6, 14)).unwrap();
        assert_eq!(start.state, DayState::Selected);
        assert!(start.clickable);

        assert_eq!(grid.cell_for(date(6, 15)).unwrap().state, DayState::InRange);
        assert_eq!(grid.cell_for(date(6, 20)).unwrap().state, DayState::Available);
    }

    #[test]
    fn test_past_days_not_clickable() {
        let grid = MonthGrid::build(
            DisplayedMonth::new(2024, 5).unwrap(),
            false,
            &availability(false),
            &SelectionRange::default(),
        );
        assert!(grid.day_cells().all(|cell| !cell.clickable && cell.state == DayState::Past));
    }

    #[test]
    fn test_read_only_nothing_clickable() {
        let grid = MonthGrid::build(june(), false, &availability(true), &SelectionRange::default());
        assert!(grid.day_cells().all(|cell| !cell.clickable));
        assert_eq!(grid.cell_for(date(6, 10)).unwrap().state, DayState::Booked);
    }
}
