//! Document storage.
//!
//! Documents are copied into `<content_root>/<area>/<file name>` and then
//! recorded in the store. The row is only written after the copy succeeds.
//!
//! Two documents with the same file name in the same area share one
//! destination: the second copy replaces the first on disk while both rows
//! remain. Set `strict_storage` to get a `Conflict` error instead.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};
use crate::record::{Document, NewDocument};
use crate::store::RecordStore;

#[derive(Debug, Clone)]
pub struct DocumentMaterializer {
    content_root: PathBuf,
    strict: bool,
}

impl DocumentMaterializer {
    pub fn new(content_root: impl Into<PathBuf>, strict: bool) -> Self {
        DocumentMaterializer {
            content_root: content_root.into(),
            strict,
        }
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Directory for a sub-area (`None` or `""` is the content root).
    pub fn area_path(&self, area: Option<&str>) -> DaybookResult<PathBuf> {
        Ok(match normalize_area(area)? {
            Some(name) => self.content_root.join(name),
            None => self.content_root.clone(),
        })
    }

    /// Create a sub-area directory. Succeeds if it already exists.
    pub fn create_area(&self, name: &str) -> DaybookResult<PathBuf> {
        let path = self.area_path(Some(name))?;
        fs::create_dir_all(&path)?;
        log::debug!("[storage] Area ready at {}", path.display());
        Ok(path)
    }

    /// Copy `source` into `area` and record it under `label`.
    pub fn store(
        &self,
        store: &RecordStore,
        label: &str,
        source: &Path,
        area: Option<&str>,
    ) -> DaybookResult<Document> {
        let area = normalize_area(area)?;

        match fs::metadata(source) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DaybookError::NotFound(source.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        }
        let file_name = source.file_name().ok_or_else(|| {
            DaybookError::InvalidInput(format!("{} has no file name", source.display()))
        })?;

        let dest_dir = self.area_path(area)?;
        fs::create_dir_all(&dest_dir)?;

        let dest = dest_dir.join(file_name);
        let existed = dest.exists();

        if existed {
            if self.strict {
                return Err(DaybookError::Conflict(dest));
            }
            if fs::canonicalize(&dest)? == fs::canonicalize(source)? {
                return Err(DaybookError::InvalidInput(format!(
                    "{} is already stored at that location",
                    source.display()
                )));
            }
            log::warn!("[storage] Overwriting existing copy at {}", dest.display());
        }

        if let Err(e) = fs::copy(source, &dest) {
            if !existed {
                let _ = fs::remove_file(&dest);
            }
            return Err(e.into());
        }

        let stored_path = fs::canonicalize(&dest)?;
        let new_doc = NewDocument {
            label: label.to_string(),
            path: stored_path,
            storage: area.map(str::to_string),
        };

        let id = match store.insert_document(&new_doc) {
            Ok(id) => id,
            Err(e) => {
                if !existed {
                    let _ = fs::remove_file(&dest);
                }
                return Err(e);
            }
        };

        log::info!("[storage] Stored '{}' at {}", label, new_doc.path.display());

        Ok(Document {
            id,
            label: new_doc.label,
            path: new_doc.path,
            storage: new_doc.storage,
        })
    }
}

/// Area names are a single plain directory name without surrounding
/// whitespace. Empty means the root. Returns the bare component, so
/// `fin/` and `fin` name the same area.
fn normalize_area(area: Option<&str>) -> DaybookResult<Option<&str>> {
    let Some(name) = area.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let mut components = Path::new(name).components();
    let normal = match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part.to_str(),
        _ => None,
    };

    match normal {
        Some(part) if !part.trim().is_empty() && part.trim() == part => Ok(Some(part)),
        _ => Err(DaybookError::InvalidInput(format!(
            "Invalid storage name '{}'. Use a single directory name",
            name
        ))),
    }
}
