//! SQLite-backed record store.
//!
//! The store only remembers where the database lives. Each operation opens its
//! own connection and drops it when done, so nothing is cached between calls.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use crate::error::{DaybookError, DaybookResult};
use crate::parse::{self, DATE_FORMAT, TIME_FORMAT};
use crate::record::{Document, Event, NewDocument, NewEvent, NewTask, Note, Task};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT,
    expires DATE
);
CREATE TABLE IF NOT EXISTS notes(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT
);
CREATE TABLE IF NOT EXISTS events(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    time TEXT
);
CREATE TABLE IF NOT EXISTS documents(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT,
    path TEXT,
    storage TEXT
);
";

#[derive(Debug, Clone)]
pub struct RecordStore {
    db_path: PathBuf,
}

impl RecordStore {
    /// Open the store at `db_path`, creating the file and schema if needed.
    pub fn open(db_path: impl Into<PathBuf>) -> DaybookResult<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let store = RecordStore { db_path };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> DaybookResult<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn init_schema(&self) -> DaybookResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        log::debug!("[store] Schema ready at {}", self.db_path.display());
        Ok(())
    }

    // INSERTS:

    pub fn insert_task(&self, task: &NewTask) -> DaybookResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO tasks(description, expires) VALUES (?1, ?2)",
            params![task.description, task.expires.format(DATE_FORMAT).to_string()],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("[store] Inserted task {}", id);
        Ok(id)
    }

    pub fn insert_note(&self, content: &str) -> DaybookResult<i64> {
        let conn = self.connect()?;
        conn.execute("INSERT INTO notes(content) VALUES (?1)", params![content])?;
        let id = conn.last_insert_rowid();
        log::debug!("[store] Inserted note {}", id);
        Ok(id)
    }

    pub fn insert_event(&self, event: &NewEvent) -> DaybookResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO events(name, time) VALUES (?1, ?2)",
            params![event.name, event.time.format(TIME_FORMAT).to_string()],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("[store] Inserted event {}", id);
        Ok(id)
    }

    pub fn insert_document(&self, doc: &NewDocument) -> DaybookResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO documents(label, path, storage) VALUES (?1, ?2, ?3)",
            params![doc.label, doc.path.to_string_lossy().into_owned(), doc.storage],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("[store] Inserted document {}", id);
        Ok(id)
    }

    // LISTINGS:

    /// All tasks, soonest expiry first.
    pub fn list_tasks(&self) -> DaybookResult<Vec<Task>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT id, description, expires FROM tasks ORDER BY expires, id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, description, expires)| {
                Ok(Task {
                    id,
                    description,
                    expires: decode(&expires, parse::parse_date)?,
                })
            })
            .collect()
    }

    /// All notes in insertion order.
    pub fn list_notes(&self) -> DaybookResult<Vec<Note>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, content FROM notes ORDER BY id")?;

        let notes = stmt
            .query_map([], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    content: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// All events, earliest first.
    pub fn list_events(&self) -> DaybookResult<Vec<Event>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, time FROM events ORDER BY time, id")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, time)| {
                Ok(Event {
                    id,
                    name,
                    time: decode(&time, parse::parse_datetime)?,
                })
            })
            .collect()
    }

    /// All documents in insertion order.
    pub fn list_documents(&self) -> DaybookResult<Vec<Document>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, label, path, storage FROM documents ORDER BY id")?;

        let docs = stmt
            .query_map([], |row| {
                Ok(Document {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    path: PathBuf::from(row.get::<_, String>(2)?),
                    storage: row
                        .get::<_, Option<String>>(3)?
                        .filter(|s| !s.is_empty()),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(docs)
    }
}

/// Decode a stored date/time column, naming the bad value on failure.
fn decode<T>(raw: &str, parse: fn(&str) -> DaybookResult<T>) -> DaybookResult<T> {
    parse(raw).map_err(|_| DaybookError::InvalidInput(format!("Corrupt stored value '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("todo.db")).unwrap();
        (dir, store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_is_idempotent() {
        let (dir, store) = open_temp();
        store.insert_note("keep me").unwrap();

        let reopened = RecordStore::open(dir.path().join("todo.db")).unwrap();
        let notes = reopened.list_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "keep me");
    }

    #[test]
    fn test_open_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("deeper").join("todo.db");
        let store = RecordStore::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert!(store.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let err = RecordStore::open(blocker.join("todo.db")).unwrap_err();
        assert!(matches!(err, DaybookError::Io(_)), "got {:?}", err);
    }

    #[test]
    fn test_corrupt_database_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("todo.db");
        std::fs::write(&db_path, vec![0xAB; 4096]).unwrap();

        let err = RecordStore::open(&db_path).unwrap_err();
        assert!(matches!(err, DaybookError::Storage(_)), "got {:?}", err);
    }

    #[test]
    fn test_ids_are_assigned_in_sequence() {
        let (_dir, store) = open_temp();
        let a = store.insert_note("a").unwrap();
        let b = store.insert_note("b").unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_tasks_sorted_by_expiry() {
        let (_dir, store) = open_temp();
        for (desc, expires) in [
            ("later", date(2025, 6, 1)),
            ("soonest", date(2023, 1, 1)),
            ("middle", date(2024, 3, 15)),
        ] {
            store
                .insert_task(&NewTask {
                    description: desc.to_string(),
                    expires,
                })
                .unwrap();
        }

        let names: Vec<_> = store
            .list_tasks()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(names, vec!["soonest", "middle", "later"]);
    }

    #[test]
    fn test_events_sorted_by_time() {
        let (_dir, store) = open_temp();
        let at = |d: u32, h: u32| date(2024, 1, d).and_hms_opt(h, 0, 0).unwrap();

        for (name, time) in [("b", at(2, 9)), ("c", at(2, 15)), ("a", at(1, 23))] {
            store
                .insert_event(&NewEvent {
                    name: name.to_string(),
                    time,
                })
                .unwrap();
        }

        let events = store.list_events().unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(events[0].time, at(1, 23));
    }

    #[test]
    fn test_notes_and_documents_keep_insertion_order() {
        let (_dir, store) = open_temp();
        store.insert_note("zeta").unwrap();
        store.insert_note("alpha").unwrap();

        store
            .insert_document(&NewDocument {
                label: "Z".to_string(),
                path: PathBuf::from("/s/z.txt"),
                storage: Some("work".to_string()),
            })
            .unwrap();
        store
            .insert_document(&NewDocument {
                label: "A".to_string(),
                path: PathBuf::from("/s/a.txt"),
                storage: None,
            })
            .unwrap();

        let notes: Vec<_> = store.list_notes().unwrap().into_iter().map(|n| n.content).collect();
        assert_eq!(notes, vec!["zeta", "alpha"]);

        let docs = store.list_documents().unwrap();
        assert_eq!(docs[0].label, "Z");
        assert_eq!(docs[0].storage.as_deref(), Some("work"));
        assert_eq!(docs[1].label, "A");
        assert_eq!(docs[1].storage, None);
        assert_eq!(docs[1].path, PathBuf::from("/s/a.txt"));
    }

    #[test]
    fn test_reads_rows_written_with_fractional_seconds() {
        let (_dir, store) = open_temp();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO events(name, time) VALUES ('Legacy', '2024-01-02T09:00:00.123456')",
            [],
        )
        .unwrap();

        let events = store.list_events().unwrap();
        assert_eq!(events[0].time.format(TIME_FORMAT).to_string(), "2024-01-02T09:00:00");
    }

    #[test]
    fn test_corrupt_stored_date_is_reported() {
        let (_dir, store) = open_temp();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO tasks(description, expires) VALUES ('bad', 'someday')",
            [],
        )
        .unwrap();

        let err = store.list_tasks().unwrap_err();
        assert!(matches!(err, DaybookError::InvalidInput(_)), "got {:?}", err);
    }
}
