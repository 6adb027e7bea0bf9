use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Style};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use weekplan_core::calendar::week_dates;
use weekplan_core::models::{EditedRow, TaskStatus};
use weekplan_core::partition::{read_edited_rows, write_edited_rows};
use weekplan_core::repository::Repository;

use crate::cli::{
    DeleteWeekCommand, ExportWeekCommand, ImportWeekCommand, ShowWeekCommand, WeekCommand,
    WeekNumberCommand, WeekSubcommand,
};
use crate::util::confirm;
use crate::views::table::{display_tasks, display_weeks, WeekSummary};

pub fn week_command(repo: &mut impl Repository, command: WeekCommand) -> Result<()> {
    match command.command {
        WeekSubcommand::List => list_weeks(repo),
        WeekSubcommand::Create(command) => create_week(repo, command),
        WeekSubcommand::Delete(command) => delete_week(repo, command),
        WeekSubcommand::Show(command) => show_week(repo, command),
        WeekSubcommand::Export(command) => export_week(repo, command),
        WeekSubcommand::Import(command) => import_week(repo, command),
    }
}

fn list_weeks(repo: &impl Repository) -> Result<()> {
    let mut summaries = Vec::new();
    for week in repo.weeks() {
        let dates = week_dates(repo.year(), week)?;
        let tasks = repo.week_tasks(week, None)?;
        summaries.push(WeekSummary {
            week,
            start: dates[0],
            end: dates[4],
            tasks: tasks.len(),
            done: tasks.iter().filter(|t| t.status == TaskStatus::Done).count(),
        });
    }
    display_weeks(&summaries);
    Ok(())
}

fn create_week(repo: &mut impl Repository, command: WeekNumberCommand) -> Result<()> {
    let carried = repo.create_week(command.week)?;
    println!(
        "{} Created week {}",
        "✓".style(Style::new().green().bold()),
        command.week.bright_white().bold()
    );
    if carried > 0 {
        println!(
            "  {} Carried over {} unfinished task(s) from week {}",
            "→".blue(),
            carried,
            command.week - 1
        );
    }
    Ok(())
}

fn delete_week(repo: &mut impl Repository, command: DeleteWeekCommand) -> Result<()> {
    let prompt = format!(
        "Are you sure you want to delete week {}? Its tasks are kept.",
        command.week
    );
    if !confirm(prompt, command.force) {
        println!("Deletion cancelled.");
        return Ok(());
    }
    repo.delete_week(command.week)?;
    println!("Deleted week {}", command.week);
    Ok(())
}

fn show_week(repo: &impl Repository, command: ShowWeekCommand) -> Result<()> {
    let dates = week_dates(repo.year(), command.week)?;
    let tasks = repo.week_tasks(command.week, command.member.as_deref())?;

    println!(
        "{} ({} to {})",
        format!("Week {}", command.week).bold(),
        dates[0],
        dates[4]
    );
    if let Some(member) = &command.member {
        println!("Member: {}", member.cyan());
    }
    display_tasks(&tasks);
    Ok(())
}

fn export_week(repo: &impl Repository, command: ExportWeekCommand) -> Result<()> {
    let rows: Vec<EditedRow> = repo
        .week_tasks(command.week, command.member.as_deref())?
        .iter()
        .map(EditedRow::from)
        .collect();

    match &command.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_edited_rows(BufWriter::new(file), &rows)?;
            eprintln!("Exported {} task(s) to {}", rows.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_edited_rows(&mut handle, &rows)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn import_week(repo: &mut impl Repository, command: ImportWeekCommand) -> Result<()> {
    let rows = if command.input == Path::new("-") {
        read_edited_rows(io::stdin().lock(), Path::new("<stdin>"))?
    } else {
        let file = File::open(&command.input)
            .with_context(|| format!("Failed to open {}", command.input.display()))?;
        read_edited_rows(BufReader::new(file), &command.input)?
    };

    let count = rows.len();
    repo.replace_partition(command.week, command.member.as_deref(), rows)?;

    let scope = match &command.member {
        Some(member) => format!("week {} for {}", command.week, member),
        None => format!("week {}", command.week),
    };
    println!(
        "{} Replaced {} with {} task(s)",
        "✓".style(Style::new().green().bold()),
        scope,
        count
    );
    Ok(())
}
