use crate::calendar::is_weekend;
use crate::error::CoreError;
use crate::models::{Roster, SupportAssignment, SupportDay, SupportStats};
use chrono::{Duration, NaiveDate};
use tracing::debug;

pub use crate::calendar::week_dates;

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if start > end {
        return Err(CoreError::InvalidRange(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

fn normalize(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

pub fn lookup(table: &[SupportAssignment], date: NaiveDate) -> Option<&SupportAssignment> {
    table.iter().find(|a| a.date == date)
}

/// Pairs each of `dates` with its assignment, if any.
pub fn days(table: &[SupportAssignment], dates: &[NaiveDate]) -> Vec<SupportDay> {
    dates
        .iter()
        .map(|&date| SupportDay {
            date,
            assignment: lookup(table, date).cloned(),
        })
        .collect()
}

/// Assigns `primary`/`secondary` to every weekday in `start..=end`.
///
/// Existing assignments for those days are replaced. Saturdays and Sundays are
/// skipped. Blank names are stored as empty cells. The result is sorted by date.
pub fn bulk_assign(
    mut table: Vec<SupportAssignment>,
    start: NaiveDate,
    end: NaiveDate,
    primary: Option<&str>,
    secondary: Option<&str>,
) -> Result<Vec<SupportAssignment>, CoreError> {
    check_range(start, end)?;
    let primary = normalize(primary);
    let secondary = normalize(secondary);

    let mut assigned = 0;
    let mut date = start;
    while date <= end {
        if !is_weekend(date) {
            table.retain(|a| a.date != date);
            table.push(SupportAssignment {
                date,
                primary_support: primary.clone(),
                secondary_support: secondary.clone(),
            });
            assigned += 1;
        }
        date += Duration::days(1);
    }

    table.sort_by_key(|a| a.date);
    debug!(%start, %end, assigned, "assigned support range");
    Ok(table)
}

/// Removes every assignment in `start..=end`, returning the table and how many
/// rows were dropped.
pub fn delete_range(
    mut table: Vec<SupportAssignment>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(Vec<SupportAssignment>, usize), CoreError> {
    check_range(start, end)?;
    let before = table.len();
    table.retain(|a| a.date < start || a.date > end);
    let removed = before - table.len();
    debug!(%start, %end, removed, "cleared support range");
    Ok((table, removed))
}

/// Per-member support counts, in roster order.
///
/// `days_since_last_primary` counts from `today` back to the member's latest
/// primary day; it is negative when that day is still ahead.
pub fn stats(table: &[SupportAssignment], roster: &Roster, today: NaiveDate) -> Vec<SupportStats> {
    roster
        .names()
        .iter()
        .map(|member| {
            let is_member = |name: &Option<String>| name.as_deref() == Some(member.as_str());
            let primary_days: Vec<NaiveDate> = table
                .iter()
                .filter(|a| is_member(&a.primary_support))
                .map(|a| a.date)
                .collect();
            let secondary_count = table
                .iter()
                .filter(|a| is_member(&a.secondary_support))
                .count();

            SupportStats {
                member: member.clone(),
                primary_count: primary_days.len(),
                secondary_count,
                days_since_last_primary: primary_days
                    .iter()
                    .max()
                    .map(|&last| (today - last).num_days()),
            }
        })
        .collect()
}
