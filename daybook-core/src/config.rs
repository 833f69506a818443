//! daybook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};

static DEFAULT_DATA_DIR: &str = "~/daybook";
static DEFAULT_DATABASE: &str = "todo.db";
static DEFAULT_CALENDAR_FILE: &str = "calendar.ics";
static DEFAULT_STORAGE_DIR: &str = "storage";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_calendar_file() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_FILE)
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_DIR)
}

/// Configuration at ~/.config/daybook/config.toml
///
/// `database`, `calendar_file` and `storage_dir` resolve against `data_dir`
/// when relative. Every key can be overridden with a `DAYBOOK_` env var.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DaybookConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_database")]
    pub database: PathBuf,

    #[serde(default = "default_calendar_file")]
    pub calendar_file: PathBuf,

    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Fail instead of overwriting a stored document with the same file name
    #[serde(default)]
    pub strict_storage: bool,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            data_dir: default_data_dir(),
            database: default_database(),
            calendar_file: default_calendar_file(),
            storage_dir: default_storage_dir(),
            strict_storage: false,
        }
    }
}

impl DaybookConfig {
    /// All paths under one directory, e.g. a temp dir in tests.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        DaybookConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Read `path` (if present) layered under `DAYBOOK_*` environment variables.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("DAYBOOK").try_parsing(true))
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> DaybookResult<String> {
        toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where the database, calendar file and stored documents live:
# data_dir = \"{}\"

# Override individual paths (relative paths resolve against data_dir):
# database = \"{}\"
# calendar_file = \"{}\"
# storage_dir = \"{}\"

# Fail instead of overwriting documents that share a file name:
# strict_storage = false
",
            DEFAULT_DATA_DIR, DEFAULT_DATABASE, DEFAULT_CALENDAR_FILE, DEFAULT_STORAGE_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
