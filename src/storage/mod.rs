//! Persistent storage
//!
//! The desk keeps nothing but its own preferences on disk; messages live on
//! the portal.

pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Platform data directory of the application
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("com", "consultdesk", "ConsultDesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
