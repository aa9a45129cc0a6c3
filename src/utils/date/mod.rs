// Date utility functions
// Calendar-day normalisation shared by the picker, the API layer and the shell

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Today's calendar day as seen from `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Parse a backend date string into a calendar day.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps and offset-less
/// `YYYY-MM-DDTHH:MM:SS` timestamps. An RFC 3339 instant counts as its UTC
/// date, the same calendar `to_iso_utc_midnight` writes in, so a range sent
/// to the backend reads back as the same days from any time zone.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.naive_utc().date());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.date())
}

/// ISO-8601 instant for the start of `date` in UTC, e.g. `2024-06-09T00:00:00.000Z`.
pub fn to_iso_utc_midnight(date: NaiveDate) -> String {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Get the number of days in a given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_calendar_day("2024-06-10"),
            Some(date(2024, 6, 10))
        );
    }

    #[test]
    fn test_parse_rfc3339_drops_time_of_day() {
        assert_eq!(
            parse_calendar_day("2024-06-10T23:59:59.999Z"),
            Some(date(2024, 6, 10))
        );
    }

    #[test]
    fn test_parse_rfc3339_uses_utc_date() {
        assert_eq!(
            parse_calendar_day("2024-06-10T22:00:00Z"),
            Some(date(2024, 6, 10))
        );
        // Local midnight in Sydney is still the previous day in UTC
        assert_eq!(
            parse_calendar_day("2024-06-11T00:00:00+10:00"),
            Some(date(2024, 6, 10))
        );
    }

    #[test]
    fn test_emitted_midnight_reads_back_as_same_day() {
        let day = date(2024, 6, 12);
        assert_eq!(parse_calendar_day(&to_iso_utc_midnight(day)), Some(day));
    }

    #[test]
    fn test_parse_naive_timestamp() {
        assert_eq!(
            parse_calendar_day("2024-06-10T08:30:00"),
            Some(date(2024, 6, 10))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_calendar_day("not a date"), None);
        assert_eq!(parse_calendar_day("   "), None);
        assert_eq!(parse_calendar_day("2024-02-30"), None);
    }

    #[test]
    fn test_iso_utc_midnight() {
        assert_eq!(
            to_iso_utc_midnight(date(2024, 6, 9)),
            "2024-06-09T00:00:00.000Z"
        );
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
