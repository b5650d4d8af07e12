//! Command and query structs accepted by the domain services.
//!
//! These are the raw input values the presentation layer collects; the
//! services own all validation.

use chrono::NaiveDate;

use crate::domain::points::MeetingFlags;
use crate::domain::models::{PointWeights, Season, TransactionKind};

#[derive(Debug, Clone)]
pub struct CreateMemberCommand {
    pub name: String,
    pub unit: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: String,
    pub name: String,
    pub unit: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct UpsertPrizeCommand {
    pub name: String,
    pub season: Season,
    pub cost: i64,
    pub stock: u32,
    pub description: Option<String>,
}

/// Which weekly meeting the attendance was recorded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingDay {
    Saturday,
    Sunday,
}

#[derive(Debug, Clone)]
pub struct RecordMeetingCommand {
    pub member_id: String,
    pub day: MeetingDay,
    pub flags: MeetingFlags,
    /// Bonus selector: a literal integer or a loosely formatted code like
    /// "5b"; see `points::parse_bonus`.
    pub bonus: String,
    pub notes: String,
    /// Reporting date; defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct RecordEventCommand {
    pub member_id: String,
    pub name: String,
    /// Defaults to the configured event-participation value.
    pub points: Option<i64>,
    pub notes: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct RecordInductionCommand {
    pub member_id: String,
    pub friend_name: Option<String>,
    /// Defaults to the configured invested-friend value.
    pub points: Option<i64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentDirection {
    Bonus,
    Deduction,
}

#[derive(Debug, Clone)]
pub struct RecordAdjustmentCommand {
    pub member_id: String,
    pub direction: AdjustmentDirection,
    /// Magnitude; the sign is derived from `direction`.
    pub amount: i64,
    pub reason: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct RedeemPrizeCommand {
    pub member_id: String,
    pub prize_id: String,
}

/// Partial configuration update; absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateConfigCommand {
    pub season_label: Option<String>,
    pub points: Option<PointWeights>,
    pub block_redeem_if_insufficient: Option<bool>,
}

/// Filters for ledger listings. All filters are optional and combined with
/// AND; the date range is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    pub kind: Option<TransactionKind>,
    pub member_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}
