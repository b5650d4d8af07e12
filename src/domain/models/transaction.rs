//! Domain model for a ledger transaction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::member::random_suffix;

/// The kind of point-affecting event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Meeting,
    Event,
    Invested,
    Adjustment,
    Redeem,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Meeting => "meeting",
            TransactionKind::Event => "event",
            TransactionKind::Invested => "invested",
            TransactionKind::Adjustment => "adjustment",
            TransactionKind::Redeem => "redeem",
        };
        write!(f, "{}", label)
    }
}

/// A single entry in the append-mostly ledger. Entries are immutable once
/// created; the only mutation is deletion, which for redeem entries triggers
/// a compensating stock increment in the redemption service.
///
/// Two timestamps are carried on purpose: `created_at` is the fine-grained
/// recency timestamp (always "now" at append, used for tie-breaking and the
/// recent-activity feed), while `date` is the user-editable calendar day used
/// for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "at")]
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "memberId")]
    pub member_id: String,
    pub points: i64,
    pub detail: String,
    /// Prize this redemption drew stock from. Only set on redeem entries;
    /// legacy snapshots predate the field, so reversal falls back to the
    /// prize name embedded in `detail` when it is absent.
    #[serde(rename = "prizeId", default, skip_serializing_if = "Option::is_none")]
    pub prize_id: Option<String>,
}

impl Transaction {
    /// Generate a unique ledger entry ID.
    /// Format: mv-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("mv-{}-{}", timestamp_ms, random_suffix())
    }
}
