use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::{OwoColorize, Style};
use weekplan_core::repository::Repository;

use crate::cli::{
    AssignSupportCommand, ClearSupportCommand, ShowSupportCommand, SupportCommand, SupportSubcommand,
};
use crate::parser::parse_local_date;
use crate::views::table::{display_support_stats, display_support_week};

pub fn support_command(repo: &mut impl Repository, command: SupportCommand) -> Result<()> {
    match command.command {
        SupportSubcommand::Week(command) => {
            let days = repo.support_for_week(command.week)?;
            println!("{}", format!("Support for week {}", command.week).bold());
            display_support_week(&days);
            Ok(())
        }
        SupportSubcommand::Show(command) => show_support(&*repo, command),
        SupportSubcommand::Assign(command) => assign_support(repo, command),
        SupportSubcommand::Clear(command) => clear_support(repo, command),
        SupportSubcommand::Stats => {
            display_support_stats(&repo.support_stats(Local::now().date_naive()));
            Ok(())
        }
    }
}

fn show_support(repo: &impl Repository, command: ShowSupportCommand) -> Result<()> {
    let date = parse_local_date(&command.date)?;
    let Some(assignment) = repo.support_on(date) else {
        println!("No support assigned on {}", date);
        return Ok(());
    };

    println!("{}", format!("Support on {}", date.format("%A %Y-%m-%d")).bold());
    println!(
        "  Primary:   {}",
        assignment.primary_support.as_deref().unwrap_or("Unassigned")
    );
    println!(
        "  Secondary: {}",
        assignment.secondary_support.as_deref().unwrap_or("-")
    );
    Ok(())
}

fn assign_support(repo: &mut impl Repository, command: AssignSupportCommand) -> Result<()> {
    let start = parse_local_date(&command.from)?;
    let end = parse_local_date(&command.to)?;
    let assigned = repo.assign_support(
        start,
        end,
        command.primary.as_deref(),
        command.secondary.as_deref(),
    )?;

    println!(
        "{} Assigned support for {} weekday(s) from {} to {}",
        "✓".style(Style::new().green().bold()),
        assigned,
        start,
        end
    );
    Ok(())
}

fn clear_support(repo: &mut impl Repository, command: ClearSupportCommand) -> Result<()> {
    let start = parse_local_date(&command.from)?;
    let end: NaiveDate = match &command.to {
        Some(to) => parse_local_date(to)?,
        None => start,
    };
    let removed = repo.clear_support(start, end)?;
    println!("Removed {} support assignment(s) from {} to {}", removed, start, end);
    Ok(())
}
