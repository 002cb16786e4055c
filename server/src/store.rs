//! File-backed persistence for the leaderboard
//!
//! The leaderboard lives in a single JSON file holding an array of
//! `{"name": ..., "score": ...}` objects. Reads are forgiving: a missing,
//! unreadable or corrupt file is treated as an empty board so the service
//! keeps running. Writes report failure through [`StoreError`], but callers
//! are free to ignore it.

use log::{debug, warn};
use shared::ScoreRecord;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure while persisting the leaderboard
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "failed to write highscores file: {}", e),
            StoreError::Serialize(e) => write!(f, "failed to serialize highscores: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e)
    }
}

/// Reads and writes the leaderboard at a fixed location
#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored leaderboard
    ///
    /// Never fails. Absence, I/O errors and malformed content all yield an
    /// empty list; anything other than a missing file is logged.
    pub fn read(&self) -> Vec<ScoreRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No highscores file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrites the stored leaderboard with `scores`
    pub fn write(&self, scores: &[ScoreRecord]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
