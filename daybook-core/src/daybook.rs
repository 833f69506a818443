//! daybook root handle: configuration plus the operations behind each command.

use std::path::{Path, PathBuf};

use crate::config::DaybookConfig;
use crate::error::DaybookResult;
use crate::ics::CalendarExporter;
use crate::materialize::DocumentMaterializer;
use crate::parse;
use crate::record::{Document, Event, NewEvent, NewTask, Note, Task};
use crate::store::RecordStore;

#[derive(Clone, Debug)]
pub struct Daybook {
    config: DaybookConfig,
}

impl Daybook {
    pub fn new(config: DaybookConfig) -> Self {
        Daybook { config }
    }

    /// Load configuration from `config_path`, or the default location.
    /// The default file is created (all options commented out) if missing.
    pub fn load(config_path: Option<&Path>) -> DaybookResult<Self> {
        let config = match config_path {
            Some(path) => DaybookConfig::load_from(path)?,
            None => {
                let path = DaybookConfig::config_path()?;
                if !path.exists() {
                    DaybookConfig::create_default_config(&path)?;
                }
                DaybookConfig::load_from(&path)?
            }
        };

        Ok(Daybook { config })
    }

    pub fn config(&self) -> &DaybookConfig {
        &self.config
    }

    // PATHS:

    pub fn data_path(&self) -> PathBuf {
        expand(&self.config.data_dir)
    }

    pub fn database_path(&self) -> PathBuf {
        self.resolve(&self.config.database)
    }

    pub fn calendar_path(&self) -> PathBuf {
        self.resolve(&self.config.calendar_file)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.resolve(&self.config.storage_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let expanded = expand(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.data_path().join(expanded)
        }
    }

    // COMPONENTS:

    /// Open the record store, initializing its schema.
    pub fn store(&self) -> DaybookResult<RecordStore> {
        RecordStore::open(self.database_path())
    }

    pub fn exporter(&self) -> CalendarExporter {
        CalendarExporter::new(self.calendar_path())
    }

    pub fn materializer(&self) -> DocumentMaterializer {
        DocumentMaterializer::new(self.storage_path(), self.config.strict_storage)
    }

    // TASKS + NOTES:

    pub fn add_task(&self, description: &str, expires: &str) -> DaybookResult<Task> {
        let expires = parse::parse_date(expires)?;
        let id = self.store()?.insert_task(&NewTask {
            description: description.to_string(),
            expires,
        })?;

        Ok(Task {
            id,
            description: description.to_string(),
            expires,
        })
    }

    pub fn list_tasks(&self) -> DaybookResult<Vec<Task>> {
        self.store()?.list_tasks()
    }

    pub fn add_note(&self, content: &str) -> DaybookResult<Note> {
        let id = self.store()?.insert_note(content)?;
        Ok(Note {
            id,
            content: content.to_string(),
        })
    }

    pub fn list_notes(&self) -> DaybookResult<Vec<Note>> {
        self.store()?.list_notes()
    }

    // EVENTS:

    /// Insert an event, then rewrite the calendar file from all events.
    pub fn add_event(&self, name: &str, time: &str) -> DaybookResult<Event> {
        let time = parse::parse_datetime(time)?;
        let store = self.store()?;
        let id = store.insert_event(&NewEvent {
            name: name.to_string(),
            time,
        })?;

        self.exporter().regenerate(&store)?;

        Ok(Event {
            id,
            name: name.to_string(),
            time,
        })
    }

    pub fn list_events(&self) -> DaybookResult<Vec<Event>> {
        self.store()?.list_events()
    }

    // DOCUMENTS:

    pub fn add_storage(&self, name: &str) -> DaybookResult<PathBuf> {
        self.materializer().create_area(name)
    }

    pub fn add_document(
        &self,
        label: &str,
        source: &Path,
        storage: Option<&str>,
    ) -> DaybookResult<Document> {
        let store = self.store()?;
        self.materializer().store(&store, label, source, storage)
    }

    pub fn list_documents(&self) -> DaybookResult<Vec<Document>> {
        self.store()?.list_documents()
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
