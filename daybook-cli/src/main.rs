mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use daybook_core::Daybook;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Keep tasks, notes, calendar events and documents in one place")]
struct Cli {
    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    AddTask {
        description: String,

        /// Expiration date (YYYY-MM-DD)
        expires: String,
    },
    /// List tasks, soonest expiry first
    ListTasks {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a note
    AddNote { content: String },
    /// List notes
    ListNotes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event and regenerate the calendar file
    AddEvent {
        name: String,

        /// Start date/time (e.g., "2025-03-20 15:00")
        time: String,
    },
    /// List events, earliest first
    ListEvents {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a storage area for documents
    AddStorage { name: String },
    /// Copy a document into storage
    AddDoc {
        label: String,

        file_path: PathBuf,

        /// Storage area to copy into (defaults to the root area)
        #[arg(long)]
        storage: Option<String>,
    },
    /// List stored documents
    ListDocs {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show where daybook keeps its data
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Unknown commands fall back to usage, like no command at all
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => return print_usage(),
        Err(e) => e.exit(),
    };

    let Some(command) = cli.command else {
        return print_usage();
    };

    let daybook = Daybook::load(cli.config.as_deref())?;
    log::debug!("[cli] Using data directory {}", daybook.data_path().display());
    daybook.store()?;

    match command {
        Commands::AddTask {
            description,
            expires,
        } => commands::tasks::add(&daybook, &description, &expires),
        Commands::ListTasks { json } => commands::tasks::list(&daybook, json),
        Commands::AddNote { content } => commands::notes::add(&daybook, &content),
        Commands::ListNotes { json } => commands::notes::list(&daybook, json),
        Commands::AddEvent { name, time } => commands::events::add(&daybook, &name, &time),
        Commands::ListEvents { json } => commands::events::list(&daybook, json),
        Commands::AddStorage { name } => commands::docs::add_storage(&daybook, &name),
        Commands::AddDoc {
            label,
            file_path,
            storage,
        } => commands::docs::add(&daybook, &label, &file_path, storage.as_deref()),
        Commands::ListDocs { json } => commands::docs::list(&daybook, json),
        Commands::Config => commands::config::run(&daybook, cli.config.as_deref()),
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
