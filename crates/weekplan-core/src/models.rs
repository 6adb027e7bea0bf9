use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::store::{Identified, Record};

/// First and last week numbers a plan can hold.
pub const FIRST_WEEK: u32 = 1;
pub const LAST_WEEK: u32 = 52;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To be started")]
    ToBeStarted,
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

serde_plain::derive_display_from_serialize!(TaskStatus);
serde_plain::derive_deserialize_from_fromstr!(TaskStatus, "a task status such as 'To be started', 'In progress' or 'Done'");

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::ToBeStarted,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // An empty cell is a row whose status was never set
            "" | "to be started" | "to-be-started" | "todo" => Ok(TaskStatus::ToBeStarted),
            "in progress" | "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

/// A row of the weekly task table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub week: u32,
    pub team_member: String,
    pub label: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Record for Task {
    type Key = u64;
    const COLUMNS: &'static [&'static str] =
        &["id", "week", "team_member", "label", "description", "status"];
    const BACKFILL_ID: bool = true;

    fn key(&self) -> u64 {
        self.id
    }
}

impl Identified for Task {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// A project parked until it can be scheduled into a week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnHoldProject {
    pub id: u64,
    pub team_member: String,
    pub label: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Record for OnHoldProject {
    type Key = u64;
    const COLUMNS: &'static [&'static str] =
        &["id", "team_member", "label", "description", "status"];
    const BACKFILL_ID: bool = true;

    fn key(&self) -> u64 {
        self.id
    }
}

impl Identified for OnHoldProject {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Who is on support duty for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupportAssignment {
    pub date: NaiveDate,
    pub primary_support: Option<String>,
    pub secondary_support: Option<String>,
}

impl Record for SupportAssignment {
    type Key = NaiveDate;
    const COLUMNS: &'static [&'static str] = &["date", "primary_support", "secondary_support"];

    fn key(&self) -> NaiveDate {
        self.date
    }
}

/// A week that has been opened for planning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekEntry {
    pub week: u32,
}

impl Record for WeekEntry {
    type Key = u32;
    const COLUMNS: &'static [&'static str] = &["week"];

    fn key(&self) -> u32 {
        self.week
    }
}

/// A task as it appears on the week edit surface: no id, no week.
///
/// Both are reassigned when the row is merged back into the task table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditedRow {
    pub team_member: String,
    pub label: String,
    pub description: String,
    pub status: TaskStatus,
}

impl EditedRow {
    pub const COLUMNS: &'static [&'static str] = &["team_member", "label", "description", "status"];
}

impl From<&Task> for EditedRow {
    fn from(task: &Task) -> Self {
        Self {
            team_member: task.team_member.clone(),
            label: task.label.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub week: u32,
    pub team_member: String,
    pub label: String,
    pub description: String,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub week: Option<u32>,
    pub team_member: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProjectData {
    pub team_member: String,
    pub label: String,
    pub description: String,
    pub status: Option<TaskStatus>,
}

/// Aggregate support load for one roster member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportStats {
    pub member: String,
    pub primary_count: usize,
    pub secondary_count: usize,
    /// `None` when the member has never been primary.
    pub days_since_last_primary: Option<i64>,
}

/// One weekday of a support week view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportDay {
    pub date: NaiveDate,
    pub assignment: Option<SupportAssignment>,
}

/// Ordered list of valid team-member names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Builds a roster, skipping blank names and keeping the first of any duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::default();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !roster.contains(&name) {
                roster.names.push(name);
            }
        }
        roster
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_lenient() {
        assert_eq!("To be started".parse::<TaskStatus>(), Ok(TaskStatus::ToBeStarted));
        assert_eq!("in-progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(" DONE ".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert!("finished".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_blank_status_is_the_default() {
        assert_eq!("".parse::<TaskStatus>(), Ok(TaskStatus::ToBeStarted));
        assert_eq!("  ".parse::<TaskStatus>(), Ok(TaskStatus::ToBeStarted));
    }

    #[test]
    fn test_status_display_uses_table_spelling() {
        assert_eq!(TaskStatus::ToBeStarted.to_string(), "To be started");
        assert_eq!(TaskStatus::InProgress.to_string(), "In progress");
        assert_eq!(TaskStatus::default(), TaskStatus::ToBeStarted);
    }

    #[test]
    fn test_roster_skips_blanks_and_duplicates() {
        let roster = Roster::new(["Alice", " ", "Bob", "Alice", " Carol "]);
        assert_eq!(roster.names(), ["Alice", "Bob", "Carol"]);
        assert!(roster.contains("Carol"));
        assert!(!roster.contains("Dave"));
    }
}
