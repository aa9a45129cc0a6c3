// Booking summary module
// Legend rows for the read-only calendar

use chrono::NaiveDate;

use crate::models::booked_interval::{BookedInterval, ItemType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: String,
    pub item_type: ItemType,
    pub from: NaiveDate,
    pub till: NaiveDate,
    pub color: String,
    pub days: i64,
}

impl SummaryEntry {
    /// "Jun 10 – Jun 12, 2024", or a single date for one-day bookings
    pub fn date_label(&self) -> String {
        if self.from == self.till {
            self.from.format("%b %-d, %Y").to_string()
        } else {
            format!(
                "{} – {}",
                self.from.format("%b %-d"),
                self.till.format("%b %-d, %Y")
            )
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSummary {
    pub entries: Vec<SummaryEntry>,
}

impl BookingSummary {
    pub fn from_intervals(intervals: &[BookedInterval]) -> Self {
        let mut entries: Vec<SummaryEntry> = intervals
            .iter()
            .map(|interval| SummaryEntry {
                label: if interval.item_name.trim().is_empty() {
                    interval.item_type.label().to_string()
                } else {
                    interval.item_name.clone()
                },
                item_type: interval.item_type,
                from: interval.booked_from,
                till: interval.booked_till,
                color: interval.display_color().to_string(),
                days: interval.day_count(),
            })
            .collect();

        entries.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.label.cmp(&b.label)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_days(&self) -> i64 {
        self.entries.iter().map(|e| e.days).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booked_interval::DEFAULT_STUDIO_COLOR;
    use pretty_assertions::assert_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_entries_sorted_and_colored() {
        let intervals = vec![
            BookedInterval::new("Rose Garden Hall", ItemType::Venue, date(6, 10), date(6, 12))
                .with_color("#AA0000"),
            BookedInterval::new("Lumen", ItemType::Studio, date(6, 2), date(6, 2)),
        ];

        let summary = BookingSummary::from_intervals(&intervals);
        assert_eq!(
            summary.entries,
            vec![
                SummaryEntry {
                    label: "Lumen".to_string(),
                    item_type: ItemType::Studio,
                    from: date(6, 2),
                    till: date(6, 2),
                    color: DEFAULT_STUDIO_COLOR.to_string(),
                    days: 1,
                },
                SummaryEntry {
                    label: "Rose Garden Hall".to_string(),
                    item_type: ItemType::Venue,
                    from: date(6, 10),
                    till: date(6, 12),
                    color: "#AA0000".to_string(),
                    days: 3,
                },
            ]
        );
        assert_eq!(summary.total_days(), 4);
    }

    #[test]
    fn test_blank_name_uses_type_label() {
        let intervals = vec![BookedInterval::new("", ItemType::Other, date(6, 2), date(6, 3))];
        let summary = BookingSummary::from_intervals(&intervals);
        assert_eq!(summary.entries[0].label, "Other");
    }

    #[test]
    fn test_date_labels() {
        let summary = BookingSummary::from_intervals(&[
            BookedInterval::new("A", ItemType::Venue, date(6, 10), date(6, 12)),
            BookedInterval::new("B", ItemType::Venue, date(6, 20), date(6, 20)),
        ]);
        assert_eq!(summary.entries[0].date_label(), "Jun 10 – Jun 12, 2024");
        assert_eq!(summary.entries[1].date_label(), "Jun 20, 2024");
    }

    #[test]
    fn test_empty() {
        assert!(BookingSummary::from_intervals(&[]).is_empty());
    }
}
