//! Domain model for a club member.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the club. Identity is immutable once created; members are
/// never hard-deleted, only deactivated, so their ledger history survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    /// Optional group label ("unit") used for roster and ranking filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub active: bool,
}

impl Member {
    /// Generate a unique member ID.
    /// Format: m-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("m-{}-{}", timestamp_ms, random_suffix())
    }
}

/// Random hex fragment appended to every generated ID. A v4 UUID fragment
/// on top of a millisecond timestamp keeps collision probability negligible
/// for the lifetime of a store.
pub(crate) fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
