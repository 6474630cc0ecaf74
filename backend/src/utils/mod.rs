//! Small parsing helpers shared by the request payloads.

use chrono::{DateTime, NaiveDate, Utc};

/// Treats an empty string the same as a missing value.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Splits a comma separated list and trims each element. Empty elements are
/// kept in place.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|skill| skill.trim().to_string()).collect()
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
