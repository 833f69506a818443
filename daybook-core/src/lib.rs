//! Core library for daybook.
//!
//! - `store`: SQLite record store for tasks, notes, events and documents
//! - `ics`: calendar file export of all events
//! - `materialize`: copying documents into managed storage areas
//! - `daybook`: the configured handle tying them together

pub mod config;
pub mod daybook;
pub mod error;
pub mod ics;
pub mod materialize;
pub mod parse;
pub mod record;
pub mod store;

pub use daybook::Daybook;
pub use error::{DaybookError, DaybookResult};
