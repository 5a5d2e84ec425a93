//! Session entry log storage: in-memory and JSON Lines file.

use super::SessionEntry;
use crate::error::ApiError;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only store of session entries.
pub trait EntryLog: Send + Sync {
    fn append(&self, entry: &SessionEntry) -> Result<(), ApiError>;

    /// Entries in append order.
    fn load(&self) -> Result<Vec<SessionEntry>, ApiError>;
}

#[derive(Debug, Default)]
pub struct MemoryEntryLog {
    entries: Mutex<Vec<SessionEntry>>,
}

impl MemoryEntryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<SessionEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl EntryLog for MemoryEntryLog {
    fn append(&self, entry: &SessionEntry) -> Result<(), ApiError> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn load(&self) -> Result<Vec<SessionEntry>, ApiError> {
        Ok(self.entries.lock().clone())
    }
}

/// One JSON object per line. A missing file is an empty log.
#[derive(Debug, Clone)]
pub struct JsonlEntryLog {
    path: PathBuf,
}

impl JsonlEntryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryLog for JsonlEntryLog {
    fn append(&self, entry: &SessionEntry) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::StorageError(format!(
                    "Failed to create session directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ApiError::StorageError(format!(
                    "Failed to open session log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<SessionEntry>, ApiError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ApiError::StorageError(format!(
                "Failed to read session log {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SessionEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed entry at {}:{}: {}",
                        self.path.display(),
                        index + 1,
                        e
                    );
                }
            }
        }
        Ok(entries)
    }
}
