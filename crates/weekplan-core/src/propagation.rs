use crate::calendar::validate_week;
use crate::error::CoreError;
use crate::models::{Task, TaskStatus, LAST_WEEK};
use crate::store::next_id;
use tracing::debug;

/// Copies every unfinished task of `from_week` into `to_week`.
///
/// Copies get fresh ids and are appended after the existing rows; the source
/// week is left untouched. `Done` tasks are never carried. A `from_week` of `0`
/// (the week before week 1) carries nothing.
pub fn propagate(mut table: Vec<Task>, from_week: u32, to_week: u32) -> Result<Vec<Task>, CoreError> {
    validate_week(to_week)?;
    if from_week == 0 {
        return Ok(table);
    }
    if from_week > LAST_WEEK {
        return Err(CoreError::InvalidRange(format!(
            "week {} is outside 1..={}",
            from_week, LAST_WEEK
        )));
    }

    let carried: Vec<Task> = table
        .iter()
        .filter(|t| t.week == from_week && t.status != TaskStatus::Done)
        .cloned()
        .collect();

    let count = carried.len();
    for mut task in carried {
        task.id = next_id(&table)?;
        task.week = to_week;
        table.push(task);
    }

    debug!(from_week, to_week, carried = count, "propagated unfinished tasks");
    Ok(table)
}

/// Carries unfinished work from the previous week into `week`.
pub fn carry_forward(table: Vec<Task>, week: u32) -> Result<Vec<Task>, CoreError> {
    let week = validate_week(week)?;
    propagate(table, week - 1, week)
}
