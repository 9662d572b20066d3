//! Filesystem data lake for rosters and assignments.
//!
//! Layout under the data directory:
//! - `normalized/tournaments.jsonl`
//! - `normalized/<tournament>/roster.jsonl`
//! - `normalized/<tournament>/assignments.jsonl`

mod directory;
mod jsonl;

pub use directory::*;
pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
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

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.normalized_dir().join("tournaments.jsonl")
    }

    /// Directory holding one tournament's files. Ids that could escape the
    /// data directory are rejected.
    pub fn tournament_dir(&self, tournament_id: &str) -> Result<PathBuf, StorageError> {
        let valid = !tournament_id.is_empty()
            && tournament_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidPath(tournament_id.to_string()));
        }
        Ok(self.normalized_dir().join(tournament_id))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
