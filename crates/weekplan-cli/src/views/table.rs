use chrono::{Duration, NaiveDate};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use weekplan_core::models::{OnHoldProject, SupportDay, SupportStats, Task, TaskStatus};

fn status_cell(status: TaskStatus) -> Cell {
    let cell = Cell::new(status.to_string());
    match status {
        TaskStatus::ToBeStarted => cell.fg(Color::Red),
        TaskStatus::InProgress => cell.fg(Color::Yellow),
        TaskStatus::Done => cell.fg(Color::Green),
    }
}

fn label_cell(label: &str, status: TaskStatus) -> Cell {
    let cell = Cell::new(label);
    if status == TaskStatus::Done {
        cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey)
    } else {
        cell.add_attribute(Attribute::Bold)
    }
}

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Member", "Label", "Description", "Status"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(Cell::new(&task.team_member));
        row.add_cell(label_cell(&task.label, task.status));
        row.add_cell(Cell::new(&task.description));
        row.add_cell(status_cell(task.status));
        table.add_row(row);
    }

    println!("{table}");
}

#[derive(Debug, Clone)]
pub struct WeekSummary {
    pub week: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub tasks: usize,
    pub done: usize,
}

pub fn display_weeks(weeks: &[WeekSummary]) {
    if weeks.is_empty() {
        println!("No weeks created yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Week", "From", "To", "Tasks", "Done"]);

    for summary in weeks {
        let mut row = Row::new();
        row.add_cell(Cell::new(summary.week).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(summary.start));
        row.add_cell(Cell::new(summary.end));
        row.add_cell(Cell::new(summary.tasks));
        let done = Cell::new(summary.done);
        row.add_cell(if summary.tasks > 0 && summary.done == summary.tasks {
            done.fg(Color::Green)
        } else {
            done
        });
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_projects(projects: &[OnHoldProject]) {
    if projects.is_empty() {
        println!("No on-hold projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Member", "Label", "Description", "Status"]);

    for project in projects {
        let mut row = Row::new();
        row.add_cell(Cell::new(project.id));
        row.add_cell(Cell::new(&project.team_member));
        row.add_cell(label_cell(&project.label, project.status));
        row.add_cell(Cell::new(&project.description));
        row.add_cell(status_cell(project.status));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_support_week(days: &[SupportDay]) {
    let mut table = Table::new();
    table.set_header(vec!["Day", "Date", "Primary", "Secondary"]);

    for day in days {
        let (primary, secondary) = day
            .assignment
            .as_ref()
            .map(|a| (a.primary_support.as_deref(), a.secondary_support.as_deref()))
            .unwrap_or((None, None));

        let mut row = Row::new();
        row.add_cell(Cell::new(day.date.format("%A")));
        row.add_cell(Cell::new(day.date));
        row.add_cell(match primary {
            Some(name) => Cell::new(name).add_attribute(Attribute::Bold),
            None => Cell::new("Unassigned").fg(Color::DarkGrey),
        });
        row.add_cell(Cell::new(secondary.unwrap_or("-")));
        table.add_row(row);
    }

    println!("{table}");
}

/// Human form of "days since the last primary shift".
pub fn recency(days_since: Option<i64>) -> String {
    match days_since {
        None => "Never".to_string(),
        Some(0) => "Today".to_string(),
        Some(days) => Duration::days(-days).humanize(),
    }
}

pub fn display_support_stats(stats: &[SupportStats]) {
    if stats.is_empty() {
        println!("No team members found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Member", "Primary", "Secondary", "Last primary"]);

    for entry in stats {
        let mut row = Row::new();
        row.add_cell(Cell::new(&entry.member));
        row.add_cell(Cell::new(entry.primary_count));
        row.add_cell(Cell::new(entry.secondary_count));
        row.add_cell(match entry.days_since_last_primary {
            None => Cell::new(recency(None)).fg(Color::DarkGrey),
            Some(days) => Cell::new(recency(Some(days))),
        });
        table.add_row(row);
    }

    println!("{table}");
}
