//! Domain model for a redeemable prize.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::member::random_suffix;

/// Categorical label partitioning prizes into offering periods.
/// Serialized as the short labels the snapshot format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "sep")]
    September,
    #[serde(rename = "dec")]
    December,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::September => write!(f, "September"),
            Season::December => write!(f, "December"),
        }
    }
}

/// A prize that members can redeem points for. `(name, season)` acts as a
/// soft natural key: upserting a matching pair updates the record in place.
/// Stock is mutated only by the redemption service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub season: Season,
    pub cost: i64,
    pub stock: u32,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Prize {
    /// Generate a unique prize ID.
    /// Format: p-<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_ms: u64) -> String {
        format!("p-{}-{}", timestamp_ms, random_suffix())
    }
}
