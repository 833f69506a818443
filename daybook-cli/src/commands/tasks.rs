use anyhow::Result;
use daybook_core::Daybook;
use owo_colors::{OwoColorize, Stream::Stdout};

use super::print_json;
use crate::render::{Render, TaskLine};

pub fn add(daybook: &Daybook, description: &str, expires: &str) -> Result<()> {
    let task = daybook.add_task(description, expires)?;
    let line = format!("Added task {}: {}", task.id, task.description);
    println!("{}", line.if_supports_color(Stdout, |t| t.green()));
    Ok(())
}

pub fn list(daybook: &Daybook, json: bool) -> Result<()> {
    let tasks = daybook.list_tasks()?;
    let today = chrono::Local::now().date_naive();

    if json {
        let rows: Vec<_> = tasks
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id,
                    "description": t.description,
                    "expires": t.expires,
                    "expired": t.is_expired_on(today),
                })
            })
            .collect();
        return print_json(&rows);
    }

    for task in &tasks {
        println!("{}", TaskLine { task, today }.render());
    }

    Ok(())
}
