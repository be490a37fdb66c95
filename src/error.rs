use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a schedule file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no header row")]
    NoHeaders,

    #[error("CSV is missing the required `{0}` column. Found headers: {1:?}")]
    MissingColumn(&'static str, Vec<String>),
}

/// Failures while writing a schedule back out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while persisting user settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
