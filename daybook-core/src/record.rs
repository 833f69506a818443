//! Record types held by the record store.
//!
//! Rows are created once and never updated, so every type here is a plain
//! value with its store-assigned `id`.

use std::fmt;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::parse::TIME_FORMAT;

/// Label shown for documents kept directly under the content root.
pub const ROOT_STORAGE_LABEL: &str = "root";

/// A task with an expiration date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub expires: NaiveDate,
}

impl Task {
    /// A task expires once `today` is strictly after its expiration date.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.expires
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (due {})", self.id, self.description, self.expires)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.content)
    }
}

/// A calendar event with a single start instant (floating local time)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub time: NaiveDateTime,
}

impl Event {
    /// Stable UID for the exported VEVENT, derived from the row id.
    pub fn uid(&self) -> String {
        format!("event-{}@daybook", self.id)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.id, self.name, self.time.format(TIME_FORMAT))
    }
}

/// A document copied into managed storage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: i64,
    pub label: String,
    /// Resolved path of the stored copy
    pub path: PathBuf,
    /// Sub-area name, `None` for the content root
    pub storage: Option<String>,
}

impl Document {
    pub fn storage_label(&self) -> &str {
        self.storage.as_deref().unwrap_or(ROOT_STORAGE_LABEL)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} (storage: {})",
            self.id,
            self.label,
            self.path.display(),
            self.storage_label()
        )
    }
}

// INSERT PAYLOADS:

#[derive(Debug, Clone)]
pub struct NewTask {
    pub description: String,
    pub expires: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub time: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub label: String,
    pub path: PathBuf,
    pub storage: Option<String>,
}
