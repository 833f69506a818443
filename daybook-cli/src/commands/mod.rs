pub mod config;
pub mod docs;
pub mod events;
pub mod notes;
pub mod tasks;

use anyhow::Result;
use serde::Serialize;

/// Print records as a pretty JSON array
fn print_json<T: Serialize>(records: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
