//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const MIN_NAME_COLUMN_WIDTH: f32 = 100.0;
pub const MAX_NAME_COLUMN_WIDTH: f32 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Width of the task-name column left of the chart.
    pub name_column_width: f32,
    /// Folder the file dialogs open in.
    pub last_directory: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name_column_width: 200.0,
            last_directory: None,
            log_filter: "info".into(),
        }
    }
}

impl AppSettings {
    pub fn set_name_column_width(&mut self, width: f32) {
        self.name_column_width = width.clamp(MIN_NAME_COLUMN_WIDTH, MAX_NAME_COLUMN_WIDTH);
    }
}

/// Settings plus the file they are persisted to.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pub settings: AppSettings,
    path: PathBuf,
}

impl SettingsStore {
    /// Load from the default location, falling back to defaults on any error.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    pub fn open(path: PathBuf) -> Self {
        let settings = if path.exists() {
            match Self::load_from_path(&path) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(
                        "Failed to load settings from {}: {}, using defaults",
                        path.display(),
                        e
                    );
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };
        let mut store = Self { settings, path };
        let width = store.settings.name_column_width;
        store.settings.set_name_column_width(width);
        store
    }

    fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "OutlineGantt") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from(".").join("settings.json"),
        }
    }

    fn load_from_path(path: &Path) -> Result<AppSettings, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder holding the settings file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        std::fs::create_dir_all(self.dir())?;
        let json = serde_json::to_string_pretty(&self.settings)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Save, logging instead of failing.
    pub fn save_or_warn(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), "failed to save settings: {e}");
        }
    }
}
