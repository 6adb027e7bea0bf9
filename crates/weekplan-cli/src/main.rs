use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weekplan_core::error::CoreError;
use weekplan_core::repository::{CsvRepository, DataPaths, Repository};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("WEEKPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = cli::Cli::parse();

    let mut config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    if let Some(data_dir) = cli.data_dir.clone() {
        config.data_dir = data_dir;
    }
    if let Some(year) = cli.year {
        config.year = year;
    }

    if let Err(e) = run(cli.command, &config) {
        handle_error(e);
        std::process::exit(1);
    }
}

fn run(command: cli::Commands, config: &config::Config) -> anyhow::Result<()> {
    debug!(data_dir = %config.data_dir.display(), year = config.year, "opening planner");
    let paths = DataPaths::in_dir(&config.data_dir);
    let mut repository = CsvRepository::open(&paths, config.year)
        .with_context(|| format!("Failed to open planner data in {}", config.data_dir.display()))?;

    match command {
        cli::Commands::Overview => commands::overview::show_overview(&repository, config)?,
        cli::Commands::Roster => commands::overview::show_roster(&repository)?,
        cli::Commands::Week(command) => commands::week::week_command(&mut repository, command)?,
        cli::Commands::Task(command) => {
            commands::task::task_command(&mut repository, command, config)?
        }
        cli::Commands::Hold(command) => {
            commands::hold::hold_command(&mut repository, command, config)?
        }
        cli::Commands::Support(command) => {
            commands::support::support_command(&mut repository, command)?
        }
        cli::Commands::Migrate => commands::overview::migrate(&mut repository)?,
    }

    repository.commit()?;
    Ok(())
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::MissingStore(path) => {
                eprintln!(
                    "{} Missing file {}. Create it with a `name` header and one team member per line.",
                    "Error:".style(error_style),
                    path.display().yellow()
                );
            }
            CoreError::SchemaMismatch { path, expected, found } => {
                eprintln!(
                    "{} {} has unexpected columns",
                    "Error:".style(error_style),
                    path.display().yellow()
                );
                eprintln!("  expected: {}", expected.join(","));
                eprintln!("  found:    {}", found.join(","));
            }
            CoreError::Validation(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidRange(s) => {
                eprintln!("{} Invalid range: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::DuplicateId(id) => {
                eprintln!(
                    "{} Duplicate id {} found, nothing was written",
                    "Error:".style(error_style),
                    id.yellow()
                );
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
