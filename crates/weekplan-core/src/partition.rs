//! Week/member partitions of the task table.
//!
//! The read path hands out owned copies of matching rows. The write path takes
//! a complete replacement for one partition and splices it back into the full
//! table without touching rows outside that partition.

use crate::calendar::validate_week;
use crate::error::CoreError;
use crate::models::{EditedRow, OnHoldProject, Roster, Task};
use crate::store::{assign_ids, next_id, read_rows, write_rows};
use std::io;
use std::path::Path;
use tracing::debug;

fn in_partition(task: &Task, week: u32, member: Option<&str>) -> bool {
    task.week == week && member.map_or(true, |m| task.team_member == m)
}

/// Rows matching `week` and `member`; `None` leaves that dimension open.
pub fn filter(table: &[Task], week: Option<u32>, member: Option<&str>) -> Result<Vec<Task>, CoreError> {
    if let Some(week) = week {
        validate_week(week)?;
    }
    Ok(table
        .iter()
        .filter(|t| week.map_or(true, |w| t.week == w))
        .filter(|t| member.map_or(true, |m| t.team_member == m))
        .cloned()
        .collect())
}

pub fn filter_on_hold(table: &[OnHoldProject], member: Option<&str>) -> Vec<OnHoldProject> {
    table
        .iter()
        .filter(|p| member.map_or(true, |m| p.team_member == m))
        .cloned()
        .collect()
}

/// Orders tasks by member, then label, then id.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.team_member
            .cmp(&b.team_member)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Checks the fields every written task or project must carry.
pub fn validate_fields(
    team_member: &str,
    label: &str,
    description: &str,
    roster: &Roster,
) -> Result<(), CoreError> {
    if label.trim().is_empty() {
        return Err(CoreError::Validation("label must not be empty".to_string()));
    }
    if description.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "description of '{}' must not be empty",
            label
        )));
    }
    if !roster.contains(team_member) {
        return Err(CoreError::Validation(format!(
            "'{}' is not on the team roster",
            team_member
        )));
    }
    Ok(())
}

/// Validates a whole edit batch; the first failing row rejects the batch.
pub fn validate_rows(rows: &[EditedRow], roster: &Roster) -> Result<(), CoreError> {
    for (index, row) in rows.iter().enumerate() {
        validate_fields(&row.team_member, &row.label, &row.description, roster).map_err(|e| match e {
            CoreError::Validation(msg) => CoreError::Validation(format!("row {}: {}", index + 1, msg)),
            other => other,
        })?;
    }
    Ok(())
}

/// Replaces the `(week, member)` partition of `full` with `edited`.
///
/// With `member = None` the partition is the whole week, so an unfiltered edit
/// replaces every member's tasks for that week. Every edited row gets
/// `week = week` and a fresh id numbered from the full table's `next_id`.
/// Rows outside the partition keep their order and come first.
pub fn merge_partition(
    full: Vec<Task>,
    week: u32,
    member: Option<&str>,
    edited: Vec<EditedRow>,
) -> Result<Vec<Task>, CoreError> {
    validate_week(week)?;
    let first_id = next_id(&full)?;

    let (replaced, mut kept): (Vec<Task>, Vec<Task>) = full
        .into_iter()
        .partition(|t| in_partition(t, week, member));

    let mut added: Vec<Task> = edited
        .into_iter()
        .map(|row| Task {
            id: 0,
            week,
            team_member: row.team_member,
            label: row.label.trim().to_string(),
            description: row.description.trim().to_string(),
            status: row.status,
        })
        .collect();
    assign_ids(&mut added, first_id)?;

    debug!(
        week,
        member = member.unwrap_or("*"),
        removed = replaced.len(),
        added = added.len(),
        "merged partition"
    );

    kept.append(&mut added);
    Ok(kept)
}

/// Parses an edit batch. The header must be exactly
/// `team_member,label,description,status`.
pub fn read_edited_rows<R: io::Read>(reader: R, source: &Path) -> Result<Vec<EditedRow>, CoreError> {
    read_rows(reader, source, EditedRow::COLUMNS, false)
}

pub fn write_edited_rows<W: io::Write>(writer: W, rows: &[EditedRow]) -> Result<(), CoreError> {
    write_rows(writer, EditedRow::COLUMNS, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    fn task(id: u64, week: u32, member: &str, label: &str) -> Task {
        Task {
            id,
            week,
            team_member: member.to_string(),
            label: label.to_string(),
            description: format!("{label} details"),
            status: TaskStatus::ToBeStarted,
        }
    }

    fn edited(member: &str, label: &str) -> EditedRow {
        EditedRow {
            team_member: member.to_string(),
            label: label.to_string(),
            description: format!("{label} details"),
            status: TaskStatus::InProgress,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, 1, "A", "w1a"),
            task(2, 2, "B", "w2b"),
            task(3, 3, "A", "w3a"),
            task(4, 3, "B", "w3b"),
        ]
    }

    #[test]
    fn test_filter_by_week_and_member() {
        let table = sample();
        assert_eq!(filter(&table, Some(3), None).unwrap().len(), 2);
        assert_eq!(filter(&table, Some(3), Some("B")).unwrap()[0].id, 4);
        assert_eq!(filter(&table, None, Some("A")).unwrap().len(), 2);
        assert_eq!(filter(&table, None, None).unwrap(), table);
        assert!(matches!(filter(&table, Some(0), None), Err(CoreError::InvalidRange(_))));
    }

    #[test]
    fn test_filtered_copy_does_not_alias() {
        let table = sample();
        let mut view = filter(&table, Some(1), None).unwrap();
        view[0].label = "changed".to_string();
        assert_eq!(table[0].label, "w1a");
    }

    #[test]
    fn test_sort_for_display() {
        let mut tasks = vec![task(3, 1, "B", "x"), task(2, 1, "A", "z"), task(1, 1, "A", "y")];
        sort_for_display(&mut tasks);
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_edit_deletes_partition_only() {
        let table = sample();
        let week2_before: Vec<Task> = table.iter().filter(|t| t.week == 2).cloned().collect();

        let result = merge_partition(table, 1, None, vec![]).unwrap();
        assert!(result.iter().all(|t| t.week != 1));
        let week2_after: Vec<Task> = result.iter().filter(|t| t.week == 2).cloned().collect();
        assert_eq!(week2_before, week2_after);
    }

    #[test]
    fn test_unfiltered_merge_replaces_whole_week() {
        let result = merge_partition(sample(), 3, None, vec![edited("A", "w3a'")]).unwrap();
        let week3: Vec<&Task> = result.iter().filter(|t| t.week == 3).collect();
        assert_eq!(week3.len(), 1);
        assert_eq!(week3[0].label, "w3a'");
        assert_eq!(week3[0].id, 5);
    }

    #[test]
    fn test_filtered_merge_keeps_other_members() {
        let result = merge_partition(sample(), 3, Some("A"), vec![edited("A", "w3a'")]).unwrap();
        let mut week3: Vec<Task> = result.into_iter().filter(|t| t.week == 3).collect();
        sort_for_display(&mut week3);
        assert_eq!(week3.len(), 2);
        assert_eq!(week3[0].label, "w3a'");
        assert_eq!(week3[1], task(4, 3, "B", "w3b"));
    }

    #[test]
    fn test_merge_never_reuses_discarded_ids() {
        // id 4 belongs to the replaced partition and is the current maximum
        let result = merge_partition(sample(), 3, None, vec![edited("A", "n1"), edited("B", "n2")]).unwrap();
        let new_ids: Vec<u64> = result.iter().filter(|t| t.week == 3).map(|t| t.id).collect();
        assert_eq!(new_ids, vec![5, 6]);
    }

    #[test]
    fn test_merge_trims_label_and_description() {
        let mut padded = edited("A", "  w3a'  ");
        padded.description = "\tcarry on \n".to_string();
        let result = merge_partition(sample(), 3, Some("A"), vec![padded]).unwrap();
        let added = result.iter().find(|t| t.id == 5).unwrap();
        assert_eq!(added.label, "w3a'");
        assert_eq!(added.description, "carry on");
    }

    #[test]
    fn test_import_accepts_loose_status_spellings() {
        let text = "team_member,label,description,status\n\
                    A,ship,roll out,done\n\
                    A,plan,next steps,todo\n\
                    B,poke,look around,\n";
        let rows = read_edited_rows(text.as_bytes(), Path::new("edit.csv")).unwrap();
        let statuses: Vec<TaskStatus> = rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::Done, TaskStatus::ToBeStarted, TaskStatus::ToBeStarted]
        );

        let merged = merge_partition(sample(), 1, None, rows).unwrap();
        assert!(merged.iter().any(|t| t.label == "ship" && t.status == TaskStatus::Done));
    }

    #[test]
    fn test_validate_rows() {
        let roster = Roster::new(["A", "B"]);
        assert!(validate_rows(&[edited("A", "ok")], &roster).is_ok());

        let mut blank = edited("A", "x");
        blank.description = "  ".to_string();
        let err = validate_rows(&[edited("B", "ok"), blank], &roster).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.starts_with("row 2")));

        assert!(validate_rows(&[edited("Z", "who")], &roster).is_err());
        assert!(validate_rows(&[edited("A", "")], &roster).is_err());
    }

    #[test]
    fn test_edit_surface_roundtrip_and_schema() {
        let rows = vec![edited("A", "one"), edited("B", "two")];
        let mut out = Vec::new();
        write_edited_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("team_member,label,description,status\n"));

        let parsed = read_edited_rows(text.as_bytes(), Path::new("edit.csv")).unwrap();
        assert_eq!(parsed, rows);

        let extra = "id,team_member,label,description,status\n";
        assert!(matches!(
            read_edited_rows(extra.as_bytes(), Path::new("edit.csv")),
            Err(CoreError::SchemaMismatch { .. })
        ));
    }
}
