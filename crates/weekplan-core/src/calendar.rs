//! Planning-year week arithmetic.
//!
//! Week 1 starts on the first Monday on or after January 1 and every later week
//! starts exactly seven days after the previous one. This is not ISO 8601: week 1
//! always begins inside the planning year.

use crate::error::CoreError;
use crate::models::{FIRST_WEEK, LAST_WEEK};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Rejects week numbers outside `1..=52`.
pub fn validate_week(week: u32) -> Result<u32, CoreError> {
    if (FIRST_WEEK..=LAST_WEEK).contains(&week) {
        Ok(week)
    } else {
        Err(CoreError::InvalidRange(format!(
            "week {} is outside {}..={}",
            week, FIRST_WEEK, LAST_WEEK
        )))
    }
}

fn january_first(year: i32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| CoreError::InvalidRange(format!("year {} is not representable", year)))
}

/// Monday of week 1.
pub fn first_monday(year: i32) -> Result<NaiveDate, CoreError> {
    let jan1 = january_first(year)?;
    let offset = (7 - jan1.weekday().num_days_from_monday()) % 7;
    Ok(jan1 + Duration::days(i64::from(offset)))
}

/// Monday through Friday of `week`.
pub fn week_dates(year: i32, week: u32) -> Result<[NaiveDate; 5], CoreError> {
    let week = validate_week(week)?;
    let monday = first_monday(year)? + Duration::weeks(i64::from(week - 1));
    Ok(std::array::from_fn(|day| monday + Duration::days(day as i64)))
}

/// The planning week containing `date`, or `None` outside weeks 1 to 52.
pub fn week_of(year: i32, date: NaiveDate) -> Option<u32> {
    let start = first_monday(year).ok()?;
    let days = (date - start).num_days();
    if days < 0 {
        return None;
    }
    let week = u32::try_from(days / 7).ok()? + 1;
    (week <= LAST_WEEK).then_some(week)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// How far through the planning year a given day is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearProgress {
    pub days_passed: i64,
    pub days_remaining: i64,
    pub percentage: f64,
}

impl YearProgress {
    pub fn for_date(year: i32, today: NaiveDate) -> Result<Self, CoreError> {
        let start = january_first(year)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| CoreError::InvalidRange(format!("year {} is not representable", year)))?;
        let total = (end - start).num_days() + 1;

        let (days_passed, days_remaining) = if today < start {
            (0, total)
        } else if today > end {
            (total, 0)
        } else {
            ((today - start).num_days(), (end - today).num_days())
        };

        Ok(Self {
            days_passed,
            days_remaining,
            percentage: days_passed as f64 / total as f64 * 100.0,
        })
    }
}
