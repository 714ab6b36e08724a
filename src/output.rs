use chrono::Local;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::model::{Status, Task};

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

fn colored_glyph(status: Status) -> ColoredString {
    match status {
        Status::Todo => status.glyph().normal(),
        Status::InProgress => status.glyph().yellow(),
        Status::Done => status.glyph().green(),
    }
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH).dimmed().to_string()
}

/// Two-line block: glyph, id and description, then status and local
/// `updatedAt`.
pub fn render_task(task: &Task) -> String {
    let updated = task
        .updated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} ID: {} | {}\n   Status : {} | updatedAt: {}",
        colored_glyph(task.status),
        task.id.to_string().bold(),
        task.description,
        task.status,
        updated
    )
}

pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    let mut lines = vec!["Tasks:".bold().to_string(), rule()];
    for task in tasks {
        lines.push(render_task(task));
        lines.push(rule());
    }
    lines.push(format!("Total tasks: {}", tasks.len()));
    lines.join("\n")
}

/// Confirmation line; JSON consumers only get the payload.
pub fn print_success(message: &str, format: Format) {
    if format == Format::Pretty {
        println!("{}", message.green());
    }
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => println!("{}", render_task(task)),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[Task], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(tasks)?),
        Format::Pretty => println!("{}", render_tasks(tasks)),
    }
    Ok(())
}
