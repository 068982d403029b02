//! Date parsing, formatting and weekday derivation.

use chrono::{Datelike, NaiveDate, Weekday};

/// Date format used throughout the forecast pipeline: "YYYY-MM-DD"
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a date string in "YYYY-MM-DD" format
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)?)
}

/// Full weekday name for a civil date.
///
/// Weekday is derived from the calendar date itself, so it cannot shift
/// across timezone boundaries the way epoch-based conversions can.
/// Upstream payloads are inconsistent about including a weekday label,
/// so it is always recomputed here and never trusted from the wire.
pub fn weekday_name(date: &NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_weekday_name() {
        // 2024-01-15 is a Monday, 2024-01-21 a Sunday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(weekday_name(&monday), "Monday");

        let sunday = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        assert_eq!(weekday_name(&sunday), "Sunday");
    }

    #[test]
    fn test_format_and_parse() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let formatted = format_date(&date);
        assert_eq!(formatted, "2024-06-15");
        let parsed = parse_date(&formatted).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2024-13-40").is_err());
    }
}
