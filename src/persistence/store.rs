//! Durable storage for the snapshot text

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// File name of the snapshot inside the data directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Errors surfaced by snapshot stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot store lock was poisoned")]
    LockPoisoned,
}

/// A single slot holding the serialized snapshot
///
/// Single writer, last write wins.
pub trait SnapshotStore {
    /// Stored text, `None` if nothing has been saved
    ///
    /// # Errors
    /// Returns `StoreError` if the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored text
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails.
    fn save(&mut self, contents: &str) -> Result<(), StoreError>;

    /// Remove the stored text, succeeding if there is none
    ///
    /// # Errors
    /// Returns `StoreError` if an existing slot cannot be removed.
    fn delete(&mut self) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        (**self).save(contents)
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        (**self).delete()
    }
}

/// Snapshot kept as `snapshot.json` in a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Store inside `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SNAPSHOT_FILE),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                log::debug!("loaded snapshot from {}", self.path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;
        log::debug!("saved snapshot to {}", self.path.display());
        Ok(())
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("deleted snapshot {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and throwaway sessions
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// a session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw snapshot text
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(contents.into()))),
        }
    }

    /// Current raw contents
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let slot = self.slot.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::LockPoisoned)?;
        *slot = Some(contents.to_string());
        Ok(())
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
