use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use weekplan_core::error::CoreError;
use weekplan_core::models::{NewTaskData, UpdateTaskData};
use weekplan_core::repository::Repository;

use crate::cli::{AddTaskCommand, DeleteCommand, EditTaskCommand, StatusCommand, TaskCommand, TaskSubcommand};
use crate::config::Config;
use crate::util::{confirm, resolve_member};

pub fn task_command(repo: &mut impl Repository, command: TaskCommand, config: &Config) -> Result<()> {
    match command.command {
        TaskSubcommand::Add(command) => add_task(repo, command, config),
        TaskSubcommand::Status(command) => set_status(repo, command),
        TaskSubcommand::Edit(command) => edit_task(repo, command),
        TaskSubcommand::Delete(command) => delete_task(repo, command),
    }
}

fn add_task(repo: &mut impl Repository, command: AddTaskCommand, config: &Config) -> Result<()> {
    let team_member = resolve_member(command.member, config)?;
    let added = repo.add_task(NewTaskData {
        week: command.week,
        team_member,
        label: command.label,
        description: command.description,
        status: command.status,
    })?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added.label.bright_white().bold()
    );
    println!(
        "  {} Week {} for {} (ID {})",
        "→".style(info_style),
        added.week,
        added.team_member,
        added.id
    );
    Ok(())
}

fn set_status(repo: &mut impl Repository, command: StatusCommand) -> Result<()> {
    let task = repo.update_task_status(command.id, command.status)?;
    println!("Task '{}' is now {}", task.label, task.status);
    Ok(())
}

fn edit_task(repo: &mut impl Repository, command: EditTaskCommand) -> Result<()> {
    let updated = repo.update_task(
        command.id,
        UpdateTaskData {
            week: command.week,
            team_member: command.member,
            label: command.label,
            description: command.description,
            status: command.status,
        },
    )?;
    println!("Updated task with ID: {}", updated.id);
    Ok(())
}

fn delete_task(repo: &mut impl Repository, command: DeleteCommand) -> Result<()> {
    let label = repo
        .find_task(command.id)
        .map(|task| task.label.clone())
        .ok_or_else(|| CoreError::NotFound(format!("No task with id {}", command.id)))?;

    if !confirm(format!("Are you sure you want to delete task '{}'?", label), command.force) {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let removed = repo.delete_task(command.id)?;
    println!("Deleted task: '{}'", removed.label);
    Ok(())
}
