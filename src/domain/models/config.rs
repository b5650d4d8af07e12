//! Scoring configuration: per-criterion meeting weights, default point
//! values for inductions and event participation, and the redemption policy.

use serde::{Deserialize, Serialize};

/// Point value awarded for each meeting criterion, plus the default values
/// used when recording inductions and event participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointWeights {
    pub bible: i64,
    pub scarf: i64,
    pub punctual: i64,
    pub notebook: i64,
    pub invested_friend: i64,
    pub event_participation: i64,
}

impl Default for PointWeights {
    fn default() -> Self {
        Self {
            bible: 1,
            scarf: 1,
            punctual: 2,
            notebook: 1,
            invested_friend: 20,
            event_participation: 10,
        }
    }
}

/// Process-wide scoring configuration, read by the point rule evaluator and
/// the redemption service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub season_label: String,
    pub points: PointWeights,
    /// When true, a redemption is rejected if the member's balance is below
    /// the prize cost. When false, redemption proceeds regardless and the
    /// balance may go negative.
    pub block_redeem_if_insufficient: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season_label: "2026".to_string(),
            points: PointWeights::default(),
            block_redeem_if_insufficient: true,
        }
    }
}
