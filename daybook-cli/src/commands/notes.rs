use anyhow::Result;
use daybook_core::Daybook;
use owo_colors::{OwoColorize, Stream::Stdout};

use super::print_json;
use crate::render::Render;

pub fn add(daybook: &Daybook, content: &str) -> Result<()> {
    let note = daybook.add_note(content)?;
    let line = format!("Added note {}", note.id);
    println!("{}", line.if_supports_color(Stdout, |t| t.green()));
    Ok(())
}

pub fn list(daybook: &Daybook, json: bool) -> Result<()> {
    let notes = daybook.list_notes()?;

    if json {
        return print_json(&notes);
    }

    for note in &notes {
        println!("{}", note.render());
    }

    Ok(())
}
