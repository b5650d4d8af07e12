//! Ledger engine: appends point-affecting entries and derives all totals.
//!
//! The ledger is the single source of truth for balances. Totals are always
//! recomputed from the full ledger in one pass; no cached counter is kept,
//! since entries can be deleted in any order and the ledger stays in the
//! hundreds to low thousands of entries.

use chrono::{Local, NaiveDate, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::commands::{
    AdjustmentDirection, LedgerQuery, MeetingDay, RecordAdjustmentCommand, RecordEventCommand,
    RecordInductionCommand, RecordMeetingCommand,
};
use crate::domain::errors::{DomainError, Result};
use crate::domain::models::{Transaction, TransactionKind};
use crate::domain::points;
use crate::domain::store::Store;
use crate::storage::Snapshot;

/// Per-member aggregates derived from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberTotals {
    /// Sum of signed points over all non-redeem entries.
    pub earned: i64,
    /// Sum of absolute points over redeem entries.
    pub redeemed: i64,
    /// Always `earned - redeemed`, never stored.
    pub balance: i64,
}

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<Store>,
}

impl LedgerService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Record a composite meeting-attendance event. The point value comes
    /// from the rule evaluator over the configured weights; the detail
    /// string lists the checked criteria plus any notes.
    pub fn record_meeting(&self, command: RecordMeetingCommand) -> Result<Transaction> {
        let weights = self.store.read(|s| s.config.points.clone());
        let total = points::meeting_points(&weights, &command.flags, &command.bonus);

        let mut criteria: Vec<&str> = Vec::new();
        if command.flags.bible {
            criteria.push("Bible");
        }
        if command.flags.scarf {
            criteria.push("Scarf");
        }
        if command.flags.punctual {
            criteria.push("Punctuality");
        }
        if command.flags.notebook {
            criteria.push("Notebook");
        }
        let bonus = command.bonus.trim();
        if !bonus.is_empty() && bonus != "0" {
            criteria.push("Bonus");
        }

        let day = match command.day {
            MeetingDay::Saturday => "Saturday meeting",
            MeetingDay::Sunday => "Sunday meeting",
        };
        let mut detail = format!("{} — {}", day, criteria.join(", "));
        let notes = command.notes.trim();
        if !notes.is_empty() {
            detail.push_str(" | ");
            detail.push_str(notes);
        }

        self.append(&command.member_id, TransactionKind::Meeting, total, detail, None, command.date)
    }

    /// Record participation in a named activity or event. Points default to
    /// the configured event-participation value.
    pub fn record_event(&self, command: RecordEventCommand) -> Result<Transaction> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("event name is required"));
        }

        let default_points = self.store.read(|s| s.config.points.event_participation);
        let total = command.points.unwrap_or(default_points);

        let mut detail = name.to_string();
        let notes = command.notes.trim();
        if !notes.is_empty() {
            detail.push_str(" | ");
            detail.push_str(notes);
        }

        self.append(&command.member_id, TransactionKind::Event, total, detail, None, command.date)
    }

    /// Record an invested (inducted) friend. Points default to the
    /// configured invested-friend value.
    pub fn record_induction(&self, command: RecordInductionCommand) -> Result<Transaction> {
        let default_points = self.store.read(|s| s.config.points.invested_friend);
        let total = command.points.unwrap_or(default_points);

        let detail = match command.friend_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(friend) => format!("Invested friend: {}", friend),
            None => "Invested friend".to_string(),
        };

        self.append(&command.member_id, TransactionKind::Invested, total, detail, None, command.date)
    }

    /// Record a manual bonus or deduction. The direction determines the
    /// sign; a zero amount or an empty reason is rejected.
    pub fn record_adjustment(&self, command: RecordAdjustmentCommand) -> Result<Transaction> {
        let reason = command.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::validation("adjustment reason is required"));
        }
        if command.amount == 0 {
            return Err(DomainError::validation("adjustment amount cannot be zero"));
        }

        let (total, label) = match command.direction {
            AdjustmentDirection::Bonus => (command.amount.abs(), "Bonus"),
            AdjustmentDirection::Deduction => (-command.amount.abs(), "Deduction"),
        };
        let detail = format!("{} — {}", label, reason);

        self.append(&command.member_id, TransactionKind::Adjustment, total, detail, None, command.date)
    }

    /// Append a ledger entry. The recency timestamp is always "now"; the
    /// reporting date is caller-supplied and defaults to today. Zero-point
    /// entries are legal but worth a warning, not a rejection.
    pub(crate) fn append(
        &self,
        member_id: &str,
        kind: TransactionKind,
        points: i64,
        detail: String,
        prize_id: Option<String>,
        date: Option<NaiveDate>,
    ) -> Result<Transaction> {
        if points == 0 {
            warn!("Recording a zero-point {} entry for member {}", kind, member_id);
        }

        let now_millis = Utc::now().timestamp_millis() as u64;
        let transaction = Transaction {
            id: Transaction::generate_id(now_millis),
            created_at: Utc::now(),
            date: date.unwrap_or_else(|| Local::now().date_naive()),
            kind,
            member_id: member_id.to_string(),
            points,
            detail,
            prize_id,
        };

        let appended = transaction.clone();
        self.store.mutate(move |s| {
            if !s.members.iter().any(|m| m.id == transaction.member_id) {
                return Err(DomainError::not_found("member", &transaction.member_id));
            }
            s.ledger.push(transaction);
            Ok(())
        })?;

        info!(
            "Appended {} entry {} for member {}: {} points",
            appended.kind, appended.id, appended.member_id, appended.points
        );
        Ok(appended)
    }

    /// Full-recompute aggregation over the entire ledger. Pre-registered
    /// members appear with all-zero totals even without entries.
    pub fn compute_totals(&self) -> HashMap<String, MemberTotals> {
        self.store.read(compute_totals_snapshot)
    }

    /// Current balance for one member; zero when no entries exist.
    pub fn member_balance(&self, member_id: &str) -> i64 {
        self.compute_totals().get(member_id).map_or(0, |t| t.balance)
    }

    /// Club-wide total: the sum of `earned - redeemed` over all members,
    /// which equals the sum of all signed ledger points since redeem entries
    /// are stored negative.
    pub fn club_total(&self) -> i64 {
        self.compute_totals().values().map(|t| t.earned - t.redeemed).sum()
    }

    /// Remove an entry from the ledger, returning it. Removal only; the
    /// redemption service owns the compensating stock adjustment for redeem
    /// entries.
    pub fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let removed = self.store.mutate(|s| remove_entry(s, transaction_id))?;
        info!("Deleted {} entry {}", removed.kind, removed.id);
        Ok(removed)
    }

    /// Filtered listing for the reporting tables: newest reporting date
    /// first, recency timestamp as tie-break.
    pub fn list_transactions(&self, query: LedgerQuery) -> Vec<Transaction> {
        self.store.read(|s| {
            let mut rows: Vec<Transaction> = s
                .ledger
                .iter()
                .filter(|t| query.kind.map_or(true, |k| t.kind == k))
                .filter(|t| query.member_id.as_deref().map_or(true, |m| t.member_id == m))
                .filter(|t| query.from.map_or(true, |from| t.date >= from))
                .filter(|t| query.to.map_or(true, |to| t.date <= to))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            if let Some(limit) = query.limit {
                rows.truncate(limit);
            }
            rows
        })
    }

    /// Most recent activity across all kinds, ordered by recency timestamp.
    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        self.store.read(|s| {
            let mut rows = s.ledger.clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            rows.truncate(limit);
            rows
        })
    }

    /// Recent history for one member, for the ranking detail view.
    pub fn member_history(&self, member_id: &str, limit: usize) -> Vec<Transaction> {
        self.list_transactions(LedgerQuery {
            member_id: Some(member_id.to_string()),
            limit: Some(limit),
            ..Default::default()
        })
    }
}

/// Single-pass totals over a snapshot. Shared with the redemption service,
/// which needs balances while already holding the state for its atomic
/// commit.
pub(crate) fn compute_totals_snapshot(s: &Snapshot) -> HashMap<String, MemberTotals> {
    let mut totals: HashMap<String, MemberTotals> = s
        .members
        .iter()
        .map(|m| (m.id.clone(), MemberTotals::default()))
        .collect();

    for entry in &s.ledger {
        let slot = totals.entry(entry.member_id.clone()).or_default();
        match entry.kind {
            TransactionKind::Redeem => slot.redeemed += entry.points.abs(),
            _ => slot.earned += entry.points,
        }
    }
    for slot in totals.values_mut() {
        slot.balance = slot.earned - slot.redeemed;
    }
    totals
}

/// Remove a ledger entry by id. Shared with the redemption service so its
/// delete-plus-reversal happens under one commit.
pub(crate) fn remove_entry(s: &mut Snapshot, transaction_id: &str) -> Result<Transaction> {
    let index = s
        .ledger
        .iter()
        .position(|t| t.id == transaction_id)
        .ok_or_else(|| DomainError::not_found("transaction", transaction_id))?;
    Ok(s.ledger.remove(index))
}
