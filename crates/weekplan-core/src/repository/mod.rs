use crate::error::CoreError;
use crate::models::{
    EditedRow, NewProjectData, NewTaskData, OnHoldProject, Roster, SupportAssignment, SupportDay,
    SupportStats, Task, TaskStatus, UpdateTaskData, WeekEntry,
};
use crate::store::{load_roster, CsvStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod on_hold;
pub mod support;
pub mod tasks;
pub mod weeks;

/// Domain-specific trait for weekly task operations
pub trait TaskRepository {
    fn add_task(&mut self, data: NewTaskData) -> Result<Task, CoreError>;
    fn find_task(&self, id: u64) -> Option<&Task>;
    fn all_tasks(&self) -> &[Task];
    /// Tasks of one week, optionally for one member, in display order.
    fn week_tasks(&self, week: u32, member: Option<&str>) -> Result<Vec<Task>, CoreError>;
    fn update_task_status(&mut self, id: u64, status: TaskStatus) -> Result<Task, CoreError>;
    fn update_task(&mut self, id: u64, data: UpdateTaskData) -> Result<Task, CoreError>;
    fn delete_task(&mut self, id: u64) -> Result<Task, CoreError>;
    /// Replaces the `(week, member)` partition with `rows`, returning the new rows.
    fn replace_partition(
        &mut self,
        week: u32,
        member: Option<&str>,
        rows: Vec<EditedRow>,
    ) -> Result<Vec<Task>, CoreError>;
}

/// Domain-specific trait for on-hold project operations
pub trait OnHoldRepository {
    fn add_project(&mut self, data: NewProjectData) -> Result<OnHoldProject, CoreError>;
    fn find_project(&self, id: u64) -> Option<&OnHoldProject>;
    fn projects(&self, member: Option<&str>) -> Vec<OnHoldProject>;
    fn update_project_status(&mut self, id: u64, status: TaskStatus) -> Result<OnHoldProject, CoreError>;
    fn delete_project(&mut self, id: u64) -> Result<OnHoldProject, CoreError>;
}

/// Domain-specific trait for the support rotation
pub trait SupportRepository {
    fn support_for_week(&self, week: u32) -> Result<Vec<SupportDay>, CoreError>;
    fn support_on(&self, date: NaiveDate) -> Option<&SupportAssignment>;
    /// Assigns every weekday in the range, returning how many days were written.
    fn assign_support(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        primary: Option<&str>,
        secondary: Option<&str>,
    ) -> Result<usize, CoreError>;
    fn clear_support(&mut self, start: NaiveDate, end: NaiveDate) -> Result<usize, CoreError>;
    fn support_stats(&self, today: NaiveDate) -> Vec<SupportStats>;
}

/// Domain-specific trait for the set of opened weeks
pub trait WeekRepository {
    fn weeks(&self) -> Vec<u32>;
    /// Opens `week` and carries the previous week's unfinished tasks into it.
    /// Returns the number of carried tasks.
    fn create_week(&mut self, week: u32) -> Result<usize, CoreError>;
    fn delete_week(&mut self, week: u32) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + OnHoldRepository + SupportRepository + WeekRepository {
    fn roster(&self) -> &Roster;
    /// Planning year used for week arithmetic.
    fn year(&self) -> i32;
    /// Flags every table for rewriting on the next commit, persisting any
    /// in-memory migration such as backfilled ids.
    fn mark_all_changed(&mut self);
    /// Writes every changed table back to disk.
    fn commit(&mut self) -> Result<(), CoreError>;
}

/// File locations of one planner's data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub tasks: PathBuf,
    pub on_hold: PathBuf,
    pub support: PathBuf,
    pub roster: PathBuf,
    pub weeks: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            tasks: dir.join("weekly_tasks.csv"),
            on_hold: dir.join("on_hold.csv"),
            support: dir.join("daily_support.csv"),
            roster: dir.join("team_members.csv"),
            weeks: dir.join("weeks.csv"),
        }
    }
}

/// Which tables were mutated since they were loaded or last committed.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Changed {
    pub tasks: bool,
    pub on_hold: bool,
    pub support: bool,
    pub weeks: bool,
}

/// Session-scoped planner state backed by CSV files.
///
/// `open` loads every table into memory; mutations only touch that copy until
/// `commit` rewrites the files. Two repositories over the same directory do not
/// see each other's uncommitted changes, and the last commit wins.
pub struct CsvRepository {
    year: i32,
    roster: Roster,
    task_store: CsvStore<Task>,
    on_hold_store: CsvStore<OnHoldProject>,
    support_store: CsvStore<SupportAssignment>,
    week_store: CsvStore<WeekEntry>,
    tasks: Vec<Task>,
    on_hold: Vec<OnHoldProject>,
    support: Vec<SupportAssignment>,
    weeks: Vec<WeekEntry>,
    changed: Changed,
}

impl CsvRepository {
    pub fn open(paths: &DataPaths, year: i32) -> Result<Self, CoreError> {
        let roster = load_roster(&paths.roster)?;
        let task_store = CsvStore::new(&paths.tasks);
        let on_hold_store = CsvStore::new(&paths.on_hold);
        let support_store = CsvStore::new(&paths.support);
        let week_store = CsvStore::new(&paths.weeks);

        Ok(Self {
            year,
            roster,
            tasks: task_store.load()?,
            on_hold: on_hold_store.load()?,
            support: support_store.load()?,
            weeks: week_store.load()?,
            task_store,
            on_hold_store,
            support_store,
            week_store,
            changed: Changed::default(),
        })
    }

    pub(crate) fn check_member(&self, member: &str) -> Result<(), CoreError> {
        if self.roster.contains(member) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "'{}' is not on the team roster",
                member
            )))
        }
    }
}

impl Repository for CsvRepository {
    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn mark_all_changed(&mut self) {
        self.changed = Changed {
            tasks: true,
            on_hold: true,
            support: true,
            weeks: true,
        };
    }

    fn commit(&mut self) -> Result<(), CoreError> {
        let changed = self.changed;
        if changed.tasks {
            self.task_store.save(&self.tasks)?;
            self.changed.tasks = false;
        }
        if changed.on_hold {
            self.on_hold_store.save(&self.on_hold)?;
            self.changed.on_hold = false;
        }
        if changed.support {
            self.support_store.save(&self.support)?;
            self.changed.support = false;
        }
        if changed.weeks {
            self.week_store.save(&self.weeks)?;
            self.changed.weeks = false;
        }
        info!(
            tasks = changed.tasks,
            on_hold = changed.on_hold,
            support = changed.support,
            weeks = changed.weeks,
            "planner data committed"
        );
        Ok(())
    }
}
