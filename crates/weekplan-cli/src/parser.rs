use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use chrono_english::{parse_date_string, Dialect};

/// Parses `YYYY-MM-DD`, falling back to natural language relative to `now`.
pub fn parse_date<Tz: TimeZone>(date_str: &str, now: DateTime<Tz>) -> Result<NaiveDate>
where
    Tz::Offset: Copy,
{
    let trimmed = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(trimmed, now, Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", date_str, e))
}

pub fn parse_local_date(date_str: &str) -> Result<NaiveDate> {
    parse_date(date_str, Local::now())
}
