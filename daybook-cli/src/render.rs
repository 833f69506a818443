//! TUI rendering traits for daybook records.
//!
//! Listing lines keep the plain `Display` form of each record; color is only
//! used for annotations, and only when stdout is a terminal.

use chrono::NaiveDate;
use daybook_core::record::{Document, Event, Note, Task};
use owo_colors::{OwoColorize, Stream::Stdout, Style};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// A task paired with the date it is judged against
pub struct TaskLine<'a> {
    pub task: &'a Task,
    pub today: NaiveDate,
}

impl Render for TaskLine<'_> {
    fn render(&self) -> String {
        if self.task.is_expired_on(self.today) {
            let tag = "EXPIRED".if_supports_color(Stdout, |t| t.style(Style::new().red().bold()));
            format!("{} {}", self.task, tag)
        } else {
            self.task.to_string()
        }
    }
}

impl Render for Note {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for Event {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for Document {
    fn render(&self) -> String {
        self.to_string()
    }
}
