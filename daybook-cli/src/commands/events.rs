use anyhow::{Context, Result};
use daybook_core::Daybook;
use owo_colors::{OwoColorize, Stream::Stdout};

use super::print_json;
use crate::render::Render;

pub fn add(daybook: &Daybook, name: &str, time: &str) -> Result<()> {
    let event = daybook
        .add_event(name, time)
        .with_context(|| format!("Could not add event '{}'", name))?;

    let line = format!("Added event {}: {}", event.id, event.name);
    println!("{}", line.if_supports_color(Stdout, |t| t.green()));
    let line = format!("  Calendar updated: {}", daybook.calendar_path().display());
    println!("{}", line.if_supports_color(Stdout, |t| t.dimmed()));
    Ok(())
}

pub fn list(daybook: &Daybook, json: bool) -> Result<()> {
    let events = daybook.list_events()?;

    if json {
        return print_json(&events);
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
