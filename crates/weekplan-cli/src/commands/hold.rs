use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use weekplan_core::error::CoreError;
use weekplan_core::models::NewProjectData;
use weekplan_core::repository::Repository;

use crate::cli::{AddProjectCommand, DeleteCommand, HoldCommand, HoldSubcommand, StatusCommand};
use crate::config::Config;
use crate::util::{confirm, resolve_member};
use crate::views::table::display_projects;

pub fn hold_command(repo: &mut impl Repository, command: HoldCommand, config: &Config) -> Result<()> {
    match command.command {
        HoldSubcommand::List(command) => {
            display_projects(&repo.projects(command.member.as_deref()));
            Ok(())
        }
        HoldSubcommand::Add(command) => add_project(repo, command, config),
        HoldSubcommand::Status(command) => set_status(repo, command),
        HoldSubcommand::Delete(command) => delete_project(repo, command),
    }
}

fn add_project(repo: &mut impl Repository, command: AddProjectCommand, config: &Config) -> Result<()> {
    let team_member = resolve_member(command.member, config)?;
    let added = repo.add_project(NewProjectData {
        team_member,
        label: command.label,
        description: command.description,
        status: command.status,
    })?;

    println!(
        "{} Put on hold: {}",
        "✓".style(Style::new().green().bold()),
        added.label.bright_white().bold()
    );
    println!("  {} Owner {} (ID {})", "→".blue(), added.team_member, added.id);
    Ok(())
}

fn set_status(repo: &mut impl Repository, command: StatusCommand) -> Result<()> {
    let project = repo.update_project_status(command.id, command.status)?;
    println!("Project '{}' is now {}", project.label, project.status);
    Ok(())
}

fn delete_project(repo: &mut impl Repository, command: DeleteCommand) -> Result<()> {
    let label = repo
        .find_project(command.id)
        .map(|project| project.label.clone())
        .ok_or_else(|| CoreError::NotFound(format!("No on-hold project with id {}", command.id)))?;

    if !confirm(format!("Are you sure you want to delete project '{}'?", label), command.force) {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let removed = repo.delete_project(command.id)?;
    println!("Deleted project: '{}'", removed.label);
    Ok(())
}
