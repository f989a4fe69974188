//! Clock-time helpers.
//!
//! Task stores exchange times as 12-hour `"hh:mm AM/PM"` text and dates as
//! `"YYYY-MM-DD"`. The configuration file writes clock times as 24-hour
//! `"HH:MM"`. Parsing is always explicit and fallible: callers branch on
//! `None` instead of swallowing errors.

use chrono::{NaiveDate, NaiveTime};

const TWELVE_HOUR: &str = "%I:%M %p";
const DATE: &str = "%Y-%m-%d";

/// Parse a 12-hour clock string such as `"09:30 AM"` or `"12:00 PM"`.
///
/// Returns `None` for empty or malformed input.
pub fn parse_12h(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, TWELVE_HOUR).ok()
}

/// Format a clock time as `"hh:mm AM/PM"`.
pub fn format_12h(time: NaiveTime) -> String {
    time.format(TWELVE_HOUR).to_string()
}

/// Format a clock time as 24-hour `"HH:MM"`.
pub fn format_24h(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a 24-hour `"HH:MM"` (or `"HH:MM:SS"`) clock string.
pub fn parse_24h(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// Parse a `"YYYY-MM-DD"` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE).ok()
}

/// Format a date as `"YYYY-MM-DD"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE).to_string()
}

/// Serde adapter writing `NaiveTime` as `"HH:MM"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_24h(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_24h(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clock time '{raw}', expected HH:MM")))
    }
}
