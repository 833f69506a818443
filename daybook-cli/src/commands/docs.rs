use std::path::Path;

use anyhow::{Context, Result};
use daybook_core::Daybook;

use super::print_json;
use crate::render::Render;

pub fn add_storage(daybook: &Daybook, name: &str) -> Result<()> {
    let path = daybook.add_storage(name)?;
    println!("Created storage: {}", path.display());
    Ok(())
}

pub fn add(daybook: &Daybook, label: &str, file_path: &Path, storage: Option<&str>) -> Result<()> {
    let doc = daybook
        .add_document(label, file_path, storage)
        .with_context(|| format!("Could not store {}", file_path.display()))?;

    println!("Stored document at {}", doc.path.display());
    Ok(())
}

pub fn list(daybook: &Daybook, json: bool) -> Result<()> {
    let docs = daybook.list_documents()?;

    if json {
        return print_json(&docs);
    }

    for doc in &docs {
        println!("{}", doc.render());
    }

    Ok(())
}
