//! Calendar date parsing for date-typed fields.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse `text` as a date or date-time.
///
/// RFC 3339 timestamps keep their time, shifted to local wall time so they
/// compare against a local "now"; every other format yields midnight of the
/// parsed day.
pub(crate) fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Local).naive_local());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime);
    }
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}
