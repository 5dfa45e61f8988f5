//! JSON document holding a whole journey snapshot.
//!
//! Used by the CLI and tests as a stand-in for the real record store.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::JourneySnapshot;
use crate::providers::MemoryStore;

/// A snapshot file opened for reading and writing.
#[derive(Debug, Clone)]
pub struct JourneyDocument {
    path: PathBuf,
    store: MemoryStore,
}

impl JourneyDocument {
    /// Open and parse a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path)?;
        let snapshot: JourneySnapshot = serde_json::from_str(&content)?;
        Ok(Self {
            path,
            store: MemoryStore::new(snapshot),
        })
    }

    /// Wrap a snapshot that will be written to `path` on save.
    pub fn create(path: impl AsRef<Path>, snapshot: JourneySnapshot) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            store: MemoryStore::new(snapshot),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    /// Write the document back as pretty JSON.
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self.store.data())?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
