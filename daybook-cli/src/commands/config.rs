use std::path::Path;

use anyhow::Result;
use daybook_core::Daybook;
use daybook_core::config::DaybookConfig;
use owo_colors::{OwoColorize, Stream::Stdout};

pub fn run(daybook: &Daybook, config_override: Option<&Path>) -> Result<()> {
    let config_path = match config_override {
        Some(path) => path.to_path_buf(),
        None => DaybookConfig::config_path()?,
    };

    println!("{}", "Paths".if_supports_color(Stdout, |t| t.bold()));
    println!("  Config:     {}", config_path.display());
    println!("  Database:   {}", daybook.database_path().display());
    println!("  Calendar:   {}", daybook.calendar_path().display());
    println!("  Storage:    {}", daybook.storage_path().display());

    println!();
    println!("{}", "Effective settings".if_supports_color(Stdout, |t| t.bold()));
    for line in daybook.config().to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
