//! Redemption engine: exchanging points for prizes.
//!
//! A redemption touches two collections at once: the prize's stock and the
//! ledger. Both mutations happen under a single commit, so no read can ever
//! observe a decremented stock without the matching redeem entry or vice
//! versa. Deleting a redeem entry runs the compensating stock increment
//! under the same rule.

use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::RedeemPrizeCommand;
use crate::domain::errors::{DomainError, Result};
use crate::domain::ledger_service::{compute_totals_snapshot, remove_entry};
use crate::domain::models::{Prize, Transaction, TransactionKind};
use crate::domain::store::Store;
use crate::storage::Snapshot;

const REDEEM_DETAIL_PREFIX: &str = "Redeemed — ";

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub transaction: Transaction,
    /// The prize after its stock decrement.
    pub prize: Prize,
}

#[derive(Clone)]
pub struct RedemptionService {
    store: Arc<Store>,
}

impl RedemptionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Redeem a prize for a member.
    ///
    /// Validation order: member and prize must exist, the prize must have
    /// stock, and, when the policy flag is on, the member's current balance
    /// must cover the cost. Only then are the stock decrement and the
    /// redeem entry committed together.
    pub fn redeem_prize(&self, command: RedeemPrizeCommand) -> Result<Redemption> {
        let redemption = self.store.mutate(|s| {
            if !s.members.iter().any(|m| m.id == command.member_id) {
                return Err(DomainError::not_found("member", &command.member_id));
            }
            let prize_index = s
                .prizes
                .iter()
                .position(|p| p.id == command.prize_id)
                .ok_or_else(|| DomainError::not_found("prize", &command.prize_id))?;
            if s.prizes[prize_index].stock == 0 {
                return Err(DomainError::OutOfStock(s.prizes[prize_index].name.clone()));
            }

            let cost = s.prizes[prize_index].cost;
            if s.config.block_redeem_if_insufficient {
                let balance = compute_totals_snapshot(s)
                    .get(&command.member_id)
                    .map_or(0, |t| t.balance);
                if balance < cost {
                    return Err(DomainError::InsufficientBalance { balance, cost });
                }
            }

            s.prizes[prize_index].stock -= 1;

            let now_millis = Utc::now().timestamp_millis() as u64;
            let transaction = Transaction {
                id: Transaction::generate_id(now_millis),
                created_at: Utc::now(),
                date: Local::now().date_naive(),
                kind: TransactionKind::Redeem,
                member_id: command.member_id.clone(),
                points: -cost.abs(),
                detail: format!("{}{}", REDEEM_DETAIL_PREFIX, s.prizes[prize_index].name),
                prize_id: Some(s.prizes[prize_index].id.clone()),
            };
            s.ledger.push(transaction.clone());

            Ok(Redemption { transaction, prize: s.prizes[prize_index].clone() })
        })?;

        info!(
            "Member {} redeemed {} for {} points (stock now {})",
            redemption.transaction.member_id,
            redemption.prize.name,
            redemption.prize.cost,
            redemption.prize.stock
        );
        Ok(redemption)
    }

    /// Delete a ledger entry, reversing its effects. For redeem entries the
    /// matching prize gets its stock incremented back; any other kind is
    /// plain removal.
    ///
    /// The reversal is best-effort: redeem entries carry the prize id, and
    /// legacy entries fall back to a case-insensitive name match against the
    /// detail text. When the prize was renamed or removed and neither
    /// matches, the stock restoration is skipped.
    pub fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let removed = self.store.mutate(|s| {
            let removed = remove_entry(s, transaction_id)?;
            if removed.kind == TransactionKind::Redeem {
                match find_redeemed_prize(s, &removed) {
                    Some(index) => {
                        s.prizes[index].stock += 1;
                        info!(
                            "Restored 1 stock to {} after deleting redemption {}",
                            s.prizes[index].name, removed.id
                        );
                    }
                    None => {
                        warn!(
                            "No prize matches deleted redemption {}; stock not restored",
                            removed.id
                        );
                    }
                }
            }
            Ok(removed)
        })?;

        info!("Deleted {} entry {}", removed.kind, removed.id);
        Ok(removed)
    }
}

/// Locate the prize a redeem entry drew stock from: by stored prize id
/// first, then by the name embedded in the detail text. First match wins
/// when names collide.
fn find_redeemed_prize(s: &Snapshot, transaction: &Transaction) -> Option<usize> {
    if let Some(prize_id) = &transaction.prize_id {
        if let Some(index) = s.prizes.iter().position(|p| &p.id == prize_id) {
            return Some(index);
        }
    }
    let name = transaction
        .detail
        .strip_prefix(REDEEM_DETAIL_PREFIX)
        .unwrap_or(&transaction.detail)
        .trim()
        .to_lowercase();
    s.prizes
        .iter()
        .position(|p| p.name.trim().to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::{
        AdjustmentDirection, CreateMemberCommand, RecordAdjustmentCommand, UpdateConfigCommand,
        UpsertPrizeCommand,
    };
    use crate::domain::models::{Member, Season};
    use crate::App;
    use chrono::NaiveDate;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = App::open(dir.path().join("state.json")).unwrap();
        (app, dir)
    }

    fn create_member(app: &App, name: &str) -> Member {
        app.members
            .create_member(CreateMemberCommand {
                name: name.to_string(),
                unit: None,
                active: true,
            })
            .unwrap()
    }

    fn award(app: &App, member_id: &str, amount: i64) {
        app.ledger
            .record_adjustment(RecordAdjustmentCommand {
                member_id: member_id.to_string(),
                direction: AdjustmentDirection::Bonus,
                amount,
                reason: "test".to_string(),
                date: None,
            })
            .unwrap();
    }

    fn create_prize(app: &App, name: &str, cost: i64, stock: u32) -> Prize {
        app.prizes
            .upsert_prize(UpsertPrizeCommand {
                name: name.to_string(),
                season: Season::September,
                cost,
                stock,
                description: None,
            })
            .unwrap()
    }

    fn redeem(app: &App, member_id: &str, prize_id: &str) -> Result<Redemption> {
        app.redemptions.redeem_prize(RedeemPrizeCommand {
            member_id: member_id.to_string(),
            prize_id: prize_id.to_string(),
        })
    }

    #[test]
    fn successful_redemption_decrements_stock_and_appends_one_entry() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        award(&app, &member.id, 200);
        let prize = create_prize(&app, "Bracelet", 180, 1);

        let redemption = redeem(&app, &member.id, &prize.id).unwrap();

        assert_eq!(redemption.prize.stock, 0);
        assert_eq!(redemption.transaction.points, -180);
        assert_eq!(redemption.transaction.prize_id.as_deref(), Some(prize.id.as_str()));

        let totals = app.ledger.compute_totals();
        let t = totals.get(&member.id).unwrap();
        assert_eq!(t.earned, 200);
        assert_eq!(t.redeemed, 180);
        assert_eq!(t.balance, 20);

        // Second attempt fails on stock, not on balance.
        let result = redeem(&app, &member.id, &prize.id);
        assert!(matches!(result, Err(DomainError::OutOfStock(_))));
    }

    #[test]
    fn insufficient_balance_blocks_and_leaves_state_untouched() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        award(&app, &member.id, 100);
        let prize = create_prize(&app, "Gift card", 380, 2);

        let result = redeem(&app, &member.id, &prize.id);
        match result {
            Err(DomainError::InsufficientBalance { balance, cost }) => {
                assert_eq!(balance, 100);
                assert_eq!(cost, 380);
            }
            other => panic!("expected InsufficientBalance, got {:?}", other.map(|r| r.transaction.id)),
        }

        assert_eq!(app.prizes.get_prize(&prize.id).unwrap().stock, 2);
        assert_eq!(app.ledger.compute_totals().get(&member.id).unwrap().redeemed, 0);
    }

    #[test]
    fn lenient_policy_allows_negative_balance() {
        let (app, _dir) = test_app();
        app.config
            .update_config(UpdateConfigCommand {
                block_redeem_if_insufficient: Some(false),
                ..Default::default()
            })
            .unwrap();

        let member = create_member(&app, "Ana");
        let prize = create_prize(&app, "Lantern", 280, 1);

        redeem(&app, &member.id, &prize.id).unwrap();
        assert_eq!(app.ledger.member_balance(&member.id), -280);
    }

    #[test]
    fn unknown_member_or_prize_is_not_found() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        let prize = create_prize(&app, "Lantern", 280, 1);

        assert!(matches!(
            redeem(&app, "m-0-missing", &prize.id),
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            redeem(&app, &member.id, "p-0-missing"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn deleting_a_redeem_entry_restores_stock() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        award(&app, &member.id, 200);
        let prize = create_prize(&app, "Bracelet", 180, 1);

        let redemption = redeem(&app, &member.id, &prize.id).unwrap();
        assert_eq!(app.prizes.get_prize(&prize.id).unwrap().stock, 0);

        app.redemptions.delete_transaction(&redemption.transaction.id).unwrap();
        assert_eq!(app.prizes.get_prize(&prize.id).unwrap().stock, 1);
        assert_eq!(app.ledger.member_balance(&member.id), 200);
    }

    #[test]
    fn deleting_a_non_redeem_entry_changes_no_stock() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        award(&app, &member.id, 50);
        let prize = create_prize(&app, "Bracelet", 180, 3);

        let tx = &app.ledger.member_history(&member.id, 1)[0];
        app.redemptions.delete_transaction(&tx.id).unwrap();

        assert_eq!(app.prizes.get_prize(&prize.id).unwrap().stock, 3);
        assert_eq!(app.ledger.member_balance(&member.id), 0);
    }

    #[test]
    fn legacy_redeem_entry_without_prize_id_falls_back_to_name_match() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        let prize = create_prize(&app, "Bracelet", 180, 2);

        // Simulate a pre-migration snapshot entry: no prize_id, name only in
        // the detail text.
        let legacy = app
            .ledger
            .append(
                &member.id,
                TransactionKind::Redeem,
                -180,
                "Redeemed — BRACELET".to_string(),
                None,
                Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            )
            .unwrap();

        app.redemptions.delete_transaction(&legacy.id).unwrap();
        assert_eq!(app.prizes.get_prize(&prize.id).unwrap().stock, 3);
    }

    #[test]
    fn reversal_is_skipped_when_no_prize_matches() {
        let (app, _dir) = test_app();
        let member = create_member(&app, "Ana");
        award(&app, &member.id, 200);
        let prize = create_prize(&app, "Bracelet", 180, 1);

        let redemption = redeem(&app, &member.id, &prize.id).unwrap();

        // Rename the prize after the redemption and drop the old id by
        // simulating a catalog rebuilt from an import.
        app.snapshots
            .import_snapshot(&{
                let mut exported: serde_json::Value =
                    serde_json::from_str(&app.snapshots.export_snapshot().unwrap()).unwrap();
                let prizes = exported["prizes"].as_array_mut().unwrap();
                prizes[0]["id"] = serde_json::Value::String("p-1-renamed".to_string());
                prizes[0]["name"] = serde_json::Value::String("Whistle".to_string());
                serde_json::to_string(&exported).unwrap()
            })
            .unwrap();

        app.redemptions.delete_transaction(&redemption.transaction.id).unwrap();

        // Neither id nor name matched: all stock left unchanged.
        let prizes = app.prizes.list_prizes(None);
        assert_eq!(prizes.len(), 1);
        assert_eq!(prizes[0].stock, 0);
        assert!(app.ledger.list_transactions(Default::default()).is_empty());
    }
}
