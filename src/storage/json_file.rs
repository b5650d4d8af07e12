//! JSON file snapshot storage.
//!
//! Persists the whole state snapshot as a single pretty-printed JSON file,
//! using the atomic write pattern (write to a temp file, then rename) so a
//! crash mid-write never leaves a truncated document behind.

use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::snapshot::Snapshot;
use super::traits::SnapshotStorage;

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            info!("No snapshot file at {:?}, starting fresh", self.path);
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                // An unreadable snapshot falls back to a fresh state rather
                // than refusing to start; the broken file stays on disk
                // until the next successful save replaces it.
                warn!("Snapshot file {:?} is unreadable ({}), starting fresh", self.path, e);
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(snapshot)?;

        // Atomic write: temp file then rename.
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
