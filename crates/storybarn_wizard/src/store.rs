//! Draft persistence.
//!
//! The browser keeps drafts in local storage; on the service side the same
//! semantics come from a JSON file: every save is written through
//! immediately, and a reload resumes from the last saved state.

use crate::Draft;
use std::path::PathBuf;
use std::sync::Mutex;
use storybarn_error::{JsonError, StorageError, StorageErrorKind, StorybarnResult};

/// Persistence for the in-progress draft.
///
/// Loading never fails on absence: a missing draft is simply the default.
pub trait DraftStore: Send + Sync {
    /// Load the saved draft, or the default when none exists.
    fn load(&self) -> StorybarnResult<Draft>;

    /// Persist the draft immediately.
    fn save(&self, draft: &Draft) -> StorybarnResult<()>;

    /// Discard the draft (successful submission or abandonment).
    fn clear(&self) -> StorybarnResult<()>;
}

/// Ephemeral draft store for tests and single-session use.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    draft: Mutex<Option<Draft>>,
}

impl MemoryDraftStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> StorybarnResult<Draft> {
        Ok(self.draft.lock().unwrap().clone().unwrap_or_default())
    }

    fn save(&self, draft: &Draft) -> StorybarnResult<()> {
        *self.draft.lock().unwrap() = Some(draft.clone());
        Ok(())
    }

    fn clear(&self) -> StorybarnResult<()> {
        *self.draft.lock().unwrap() = None;
        Ok(())
    }
}

/// JSON-file draft store that survives restarts.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    /// Create a store at the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> StorybarnResult<Draft> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Draft::default()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into())
            }
        };

        serde_json::from_str(&raw).map_err(|e| JsonError::new(e.to_string()).into())
    }

    fn save(&self, draft: &Draft) -> StorybarnResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let raw = serde_json::to_string_pretty(draft)
            .map_err(|e| JsonError::new(e.to_string()))?;

        // Write-through with temp + rename, same as the image store.
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, raw).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        Ok(())
    }

    fn clear(&self) -> StorybarnResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
            .into()),
        }
    }
}
