//! # Storage Traits
//!
//! Abstraction over where the state snapshot lives. The domain layer talks
//! to a `SnapshotStorage` and never knows whether it is backed by a JSON
//! file, a browser storage shim, or a test double.

use anyhow::Result;

use super::snapshot::Snapshot;

/// Whole-snapshot persistence: the entire state document is read and written
/// in one piece, mirroring the original per-browser storage model.
pub trait SnapshotStorage: Send + Sync {
    /// Load the persisted snapshot, or `None` when no usable snapshot exists
    /// yet (first run, or an unreadable document).
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Persist the full snapshot. Must be all-or-nothing: a failed save
    /// leaves any previously persisted snapshot intact.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}
