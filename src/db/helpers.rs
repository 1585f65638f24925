use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Stored timestamp format, second precision, UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .with_context(|| format!("invalid timestamp '{value}'"))
}
