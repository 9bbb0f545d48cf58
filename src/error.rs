//! Error types for operant-eval operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for operant-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting or analyzing trial data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A data folder (or its required subfolder) is missing or unreadable.
    #[error("Data folder error: {path}: {reason}")]
    DataFolder {
        /// Folder that failed validation.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A per-session settings file is missing or malformed.
    #[error("Settings file error: {path}: {reason}")]
    Settings {
        /// Path to the settings JSON.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A trial CSV row could not be decoded.
    #[error("Trial data error at {path}:{line}: {reason}")]
    TrialRow {
        /// Path to the trial CSV.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// Reason for the failure.
        reason: String,
    },

    /// Error writing the report file.
    #[error("Report error: {0}")]
    Report(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
