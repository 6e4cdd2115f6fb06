//! File-backed session autosave.
//!
//! The store implements the core's [`ChangeNotifier`] seam: every state
//! change overwrites one JSON snapshot file. Notification is
//! fire-and-forget per the session contract, so write failures are traced
//! and dropped rather than surfaced to the caller; the explicit
//! [`JsonFileStore::save`]/[`JsonFileStore::load`] API reports them.

use std::fs;
use std::path::{Path, PathBuf};

use session_core::{ChangeNotifier, SessionSnapshot};

/// Errors from explicit store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Single-file JSON snapshot store.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot atomically (temp file + rename).
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<SessionSnapshot, StoreError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl ChangeNotifier for JsonFileStore {
    fn state_changed(&self, snapshot: &SessionSnapshot) {
        if let Err(err) = self.save(snapshot) {
            tracing::warn!(path = %self.path.display(), %err, "session autosave failed");
        }
    }
}
