//! Calendar export.
//!
//! The calendar file is a projection of the `events` table. It is rebuilt in
//! full after every event insertion and swapped into place with a rename, so
//! readers see either the old file or the new one.

mod generate;
mod parse;

pub use generate::generate_calendar;
pub use parse::{CalendarEntry, read_entries};

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DaybookError, DaybookResult};
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct CalendarExporter {
    calendar_path: PathBuf,
}

impl CalendarExporter {
    pub fn new(calendar_path: impl Into<PathBuf>) -> Self {
        CalendarExporter {
            calendar_path: calendar_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.calendar_path
    }

    /// Rewrite the calendar file from every event in `store`.
    /// Returns the number of entries written.
    pub fn regenerate(&self, store: &RecordStore) -> DaybookResult<usize> {
        let events = store.list_events()?;
        let content = generate_calendar(&events, chrono::Utc::now());

        self.write(&content)?;

        log::info!(
            "[calendar] Wrote {} events to {}",
            events.len(),
            self.calendar_path.display()
        );
        Ok(events.len())
    }

    fn write(&self, content: &str) -> DaybookResult<()> {
        let dir = self
            .calendar_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        std::fs::create_dir_all(dir).map_err(|e| self.export_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.export_error(e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.export_error(e))?;

        // Temp files are created owner-only; keep the calendar's own mode
        if let Some(permissions) = self.target_permissions() {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| self.export_error(e))?;
        }

        tmp.persist(&self.calendar_path)
            .map_err(|e| self.export_error(e.error))?;

        Ok(())
    }

    /// Mode of the existing calendar file, or 0644 for a new one.
    fn target_permissions(&self) -> Option<std::fs::Permissions> {
        match std::fs::metadata(&self.calendar_path) {
            Ok(meta) if meta.is_file() => Some(meta.permissions()),
            _ => default_permissions(),
        }
    }

    fn export_error(&self, e: std::io::Error) -> DaybookError {
        DaybookError::Export(format!(
            "Could not write {}: {}",
            self.calendar_path.display(),
            e
        ))
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewEvent;
    use chrono::NaiveDate;

    fn setup() -> (tempfile::TempDir, RecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("todo.db")).unwrap();
        (dir, store)
    }

    fn add(store: &RecordStore, name: &str, day: u32) {
        store
            .insert_event(&NewEvent {
                name: name.to_string(),
                time: NaiveDate::from_ymd_opt(2024, 2, day)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_regenerate_writes_every_event() {
        let (dir, store) = setup();
        add(&store, "One", 3);
        add(&store, "Two", 1);

        let exporter = CalendarExporter::new(dir.path().join("calendar.ics"));
        assert_eq!(exporter.regenerate(&store).unwrap(), 2);

        let content = std::fs::read_to_string(exporter.path()).unwrap();
        let mut summaries: Vec<_> = read_entries(&content)
            .unwrap()
            .into_iter()
            .map(|e| e.summary)
            .collect();
        summaries.sort();
        assert_eq!(summaries, vec!["One", "Two"]);
    }

    #[test]
    fn test_regenerate_overwrites_previous_file() {
        let (dir, store) = setup();
        let path = dir.path().join("calendar.ics");
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        let exporter = CalendarExporter::new(&path);
        assert_eq!(exporter.regenerate(&store).unwrap(), 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(read_entries(&content).unwrap().is_empty());
    }

    #[test]
    fn test_regenerate_creates_parent_directory() {
        let (dir, store) = setup();
        add(&store, "One", 3);

        let path = dir.path().join("exports").join("calendar.ics");
        CalendarExporter::new(&path).regenerate(&store).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_target_is_export_error() {
        let (dir, store) = setup();
        // A directory cannot be replaced by the rename
        let path = dir.path().join("calendar.ics");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let err = CalendarExporter::new(&path).regenerate(&store).unwrap_err();
        assert!(matches!(err, DaybookError::Export(_)), "got {:?}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_regenerate_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = setup();
        let path = dir.path().join("calendar.ics");
        let exporter = CalendarExporter::new(&path);

        exporter.regenerate(&store).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();
        add(&store, "One", 3);
        exporter.regenerate(&store).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
