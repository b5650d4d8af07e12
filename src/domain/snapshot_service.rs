//! Whole-snapshot export and import.
//!
//! Export produces the full state document as JSON, byte-reproducible from
//! the in-memory state. Import validates the document's required sections
//! before replacing state wholesale; a rejected import leaves the prior
//! state untouched. Presentation-owned sections round-trip unchanged.

use log::info;
use std::sync::Arc;

use crate::domain::errors::{DomainError, Result};
use crate::domain::store::Store;
use crate::storage::Snapshot;

/// Sections a snapshot document must carry to be importable.
const REQUIRED_SECTIONS: [&str; 4] = ["config", "members", "ledger", "prizes"];

#[derive(Clone)]
pub struct SnapshotService {
    store: Arc<Store>,
}

impl SnapshotService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Serialize the current state as a pretty-printed JSON document.
    pub fn export_snapshot(&self) -> Result<String> {
        let snapshot = self.store.read(|s| s.clone());
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| DomainError::Storage(anyhow::Error::new(e)))
    }

    /// Replace the current state with an imported snapshot document.
    ///
    /// The document must be a JSON object carrying `config`, `members`,
    /// `ledger`, and `prizes`; anything else is rejected with a validation
    /// error and the prior state is retained.
    pub fn import_snapshot(&self, data: &str) -> Result<Snapshot> {
        let value: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| DomainError::validation(format!("snapshot is not valid JSON: {}", e)))?;
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::validation("snapshot must be a JSON object"))?;
        for section in REQUIRED_SECTIONS {
            if !object.contains_key(section) {
                return Err(DomainError::validation(format!(
                    "snapshot is missing required section '{}'",
                    section
                )));
            }
        }

        let snapshot: Snapshot = serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("snapshot structure is invalid: {}", e)))?;

        self.store.replace(snapshot.clone())?;
        info!(
            "Imported snapshot: {} members, {} prizes, {} ledger entries",
            snapshot.members.len(),
            snapshot.prizes.len(),
            snapshot.ledger.len()
        );
        Ok(snapshot)
    }
}
