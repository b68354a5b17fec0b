//! Lobby score file loading.
//!
//! Score files are written by the lobby scraper into the data directory,
//! one JSON document per lobby:
//! - `lobbies_<id>_<hash>_scores.json` → `{ "matches": [...] }`

mod matches;

pub use matches::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Invalid lobby URL: {0}")]
    InvalidLobbyUrl(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of a score file inside the data directory.
    pub fn score_path(&self, filename: &str) -> PathBuf {
        self.data_dir.join(filename)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
