//! The whole-state snapshot document.
//!
//! All persisted state lives in one document: metadata, configuration, the
//! member and prize collections, and the ledger. The presentation layer owns
//! a few extra sections (`home` display rules, `upcomingEvents`, the `auth`
//! UI-gate flag); the core never interprets those, but they must round-trip
//! unchanged through export and import, so they are carried as opaque JSON
//! values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::models::{Config, Member, Prize, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: Meta,
    pub config: Config,
    pub members: Vec<Member>,
    pub prizes: Vec<Prize>,
    pub ledger: Vec<Transaction>,
    /// Presentation-owned home screen rules, round-tripped verbatim.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub home: Value,
    /// Presentation-owned upcoming events list, round-tripped verbatim.
    #[serde(rename = "upcomingEvents", default, skip_serializing_if = "Value::is_null")]
    pub upcoming_events: Value,
    /// Presentation-owned UI-gate flag, round-tripped verbatim. Not a
    /// security boundary.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub auth: Value,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            meta: Meta { updated_at: Utc::now() },
            config: Config::default(),
            members: Vec::new(),
            prizes: Vec::new(),
            ledger: Vec::new(),
            home: Value::Null,
            upcoming_events: Value::Null,
            auth: Value::Null,
        }
    }
}
