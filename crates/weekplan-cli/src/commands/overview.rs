use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use weekplan_core::calendar::{week_of, YearProgress};
use weekplan_core::repository::Repository;

use crate::config::Config;

pub fn show_overview(repo: &impl Repository, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let year = repo.year();
    let progress = YearProgress::for_date(year, today)?;

    println!("{}", config.team_name.bright_white().bold());
    println!(
        "{} {}: {:.1}% ({} days passed, {} remaining)",
        "Year".blue(),
        year,
        progress.percentage,
        progress.days_passed,
        progress.days_remaining
    );
    if let Some(week) = week_of(year, today) {
        println!("{} {}", "Current week:".blue(), week);
    }

    let weeks = repo.weeks();
    if weeks.is_empty() {
        println!("No weeks created yet. Run `weekplan week create <N>`.");
    } else {
        let list: Vec<String> = weeks.iter().map(u32::to_string).collect();
        println!("{} {}", "Weeks:".blue(), list.join(", "));
    }
    println!(
        "{} {} task(s), {} on-hold project(s), {} member(s)",
        "Totals:".blue(),
        repo.all_tasks().len(),
        repo.projects(None).len(),
        repo.roster().names().len()
    );
    Ok(())
}

pub fn show_roster(repo: &impl Repository) -> Result<()> {
    let roster = repo.roster();
    if roster.is_empty() {
        println!("The roster is empty.");
        return Ok(());
    }
    for name in roster.names() {
        println!("{}", name);
    }
    Ok(())
}

/// Flags every table so the next commit rewrites it in canonical form.
pub fn migrate(repo: &mut impl Repository) -> Result<()> {
    repo.mark_all_changed();
    println!("Rewrote all tables in the current format.");
    Ok(())
}
