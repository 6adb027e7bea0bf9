use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weekplan_core::models::TaskStatus;

/// Weekplan: weekly tasks, on-hold projects and the daily support rotation of a team
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the CSV tables (overrides the configured one)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Planning year used for week numbers (overrides the configured one)
    #[arg(long, global = true)]
    pub year: Option<i32>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the team, year progress and created weeks
    Overview,
    /// List team members
    Roster,
    /// Manage planning weeks
    Week(WeekCommand),
    /// Manage weekly tasks
    Task(TaskCommand),
    /// Manage on-hold projects
    Hold(HoldCommand),
    /// Manage the daily support rotation
    Support(SupportCommand),
    /// Rewrite every table in its current format, persisting backfilled ids
    Migrate,
}

#[derive(Parser, Debug, Clone)]
pub struct WeekCommand {
    #[command(subcommand)]
    pub command: WeekSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WeekSubcommand {
    /// List created weeks
    List,
    /// Create a week, carrying over the previous week's unfinished tasks
    Create(WeekNumberCommand),
    /// Delete a created week (its tasks are kept)
    Delete(DeleteWeekCommand),
    /// Show the tasks of a week
    Show(ShowWeekCommand),
    /// Write a week's tasks to CSV for editing
    Export(ExportWeekCommand),
    /// Replace a week's tasks with an edited CSV
    Import(ImportWeekCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct WeekNumberCommand {
    /// The week number (1-52)
    pub week: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteWeekCommand {
    /// The week number (1-52)
    pub week: u32,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowWeekCommand {
    /// The week number (1-52)
    pub week: u32,
    /// Only show this member's tasks
    #[clap(short, long)]
    pub member: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportWeekCommand {
    /// The week number (1-52)
    pub week: u32,
    /// Only export this member's tasks
    #[clap(short, long)]
    pub member: Option<String>,
    /// Output file; stdout when omitted
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportWeekCommand {
    /// The week number (1-52)
    pub week: u32,
    /// Only replace this member's tasks
    #[clap(short, long)]
    pub member: Option<String>,
    /// Edited CSV file, or `-` for stdin
    #[clap(short, long)]
    pub input: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub command: TaskSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskSubcommand {
    /// Add a task to a week
    Add(AddTaskCommand),
    /// Change a task's status
    Status(StatusCommand),
    /// Edit a task
    Edit(EditTaskCommand),
    /// Delete a task
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddTaskCommand {
    /// The week number (1-52)
    #[clap(short, long)]
    pub week: u32,
    /// The team member owning the task; falls back to the configured default
    #[clap(short, long)]
    pub member: Option<String>,
    /// Short label of the task
    #[clap(short, long)]
    pub label: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: String,
    /// Initial status ("To be started", "In progress" or "Done")
    #[clap(short, long)]
    pub status: Option<TaskStatus>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusCommand {
    /// The ID of the record
    pub id: u64,
    /// The new status ("To be started", "In progress" or "Done")
    pub status: TaskStatus,
}

#[derive(Parser, Debug, Clone)]
pub struct EditTaskCommand {
    /// The ID of the task to edit
    pub id: u64,

    #[arg(long)]
    pub member: Option<String>,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<TaskStatus>,

    /// Move the task to another week
    #[arg(long)]
    pub week: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the record to delete
    pub id: u64,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct HoldCommand {
    #[command(subcommand)]
    pub command: HoldSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HoldSubcommand {
    /// List on-hold projects
    List(ListProjectsCommand),
    /// Put a project on hold
    Add(AddProjectCommand),
    /// Change a project's status
    Status(StatusCommand),
    /// Delete an on-hold project
    Delete(DeleteCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct ListProjectsCommand {
    /// Only list this member's projects
    #[clap(short, long)]
    pub member: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddProjectCommand {
    /// The team member owning the project; falls back to the configured default
    #[clap(short, long)]
    pub member: Option<String>,
    #[clap(short, long)]
    pub label: String,
    #[clap(short, long)]
    pub description: String,
    #[clap(short, long)]
    pub status: Option<TaskStatus>,
}

#[derive(Parser, Debug, Clone)]
pub struct SupportCommand {
    #[command(subcommand)]
    pub command: SupportSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SupportSubcommand {
    /// Show who is on support each day of a week
    Week(WeekNumberCommand),
    /// Show who is on support on a single day
    Show(ShowSupportCommand),
    /// Assign support for every weekday in a date range
    Assign(AssignSupportCommand),
    /// Remove support assignments in a date range
    Clear(ClearSupportCommand),
    /// Show how often each member has been on support
    Stats,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowSupportCommand {
    /// The day to look up (e.g. "2026-01-05" or "tomorrow")
    pub date: String,
}

#[derive(Parser, Debug, Clone)]
pub struct AssignSupportCommand {
    /// First day of the range (e.g. "2026-01-05" or "next monday")
    #[arg(long)]
    pub from: String,
    /// Last day of the range, inclusive
    #[arg(long)]
    pub to: String,
    /// Primary support member
    #[arg(long)]
    pub primary: Option<String>,
    /// Secondary support member
    #[arg(long)]
    pub secondary: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ClearSupportCommand {
    /// First day of the range
    #[arg(long)]
    pub from: String,
    /// Last day of the range, inclusive; defaults to `--from`
    #[arg(long)]
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_status_accepts_csv_spelling() {
        let cli = Cli::try_parse_from(["weekplan", "task", "status", "7", "In progress"]).unwrap();
        match cli.command {
            Commands::Task(TaskCommand {
                command: TaskSubcommand::Status(command),
            }) => {
                assert_eq!(command.id, 7);
                assert_eq!(command.status, TaskStatus::InProgress);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["weekplan", "task", "status", "7", "finished"]).is_err());
    }
}
