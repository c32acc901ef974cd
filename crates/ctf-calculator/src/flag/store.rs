//! Persistence of the single "challenge completed" flag

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Result type for completion stores
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading or writing the completion flag
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored state is not valid JSON
    #[error("Malformed completion state: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing storage is not reachable (e.g. browser storage disabled)
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Error message
        message: String,
    },
}

impl StoreError {
    /// Create an unavailable-storage error
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Readable/settable persisted `completed` flag
pub trait CompletionStore {
    /// Whether the challenge was solved before
    fn is_completed(&self) -> StoreResult<bool>;

    /// Persist `completed = true`
    fn mark_completed(&mut self) -> StoreResult<()>;

    /// Forget a previous completion
    fn reset(&mut self) -> StoreResult<()>;
}

/// In-memory store, lives as long as the value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    completed: bool,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already records a completion
    #[must_use]
    pub fn completed() -> Self {
        Self { completed: true }
    }
}

impl CompletionStore for MemoryStore {
    fn is_completed(&self) -> StoreResult<bool> {
        Ok(self.completed)
    }

    fn mark_completed(&mut self) -> StoreResult<()> {
        self.completed = true;
        Ok(())
    }

    fn reset(&mut self) -> StoreResult<()> {
        self.completed = false;
        Ok(())
    }
}

/// On-disk representation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionState {
    completed: bool,
}

/// JSON file store used by the native front end
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, state: &CompletionState) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        debug!(path = %self.path.display(), completed = state.completed, "completion state written");
        Ok(())
    }
}

impl CompletionStore for FileStore {
    fn is_completed(&self) -> StoreResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&self.path)?;
        let state: CompletionState = serde_json::from_str(&content)?;
        Ok(state.completed)
    }

    fn mark_completed(&mut self) -> StoreResult<()> {
        self.write(&CompletionState { completed: true })
    }

    fn reset(&mut self) -> StoreResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
