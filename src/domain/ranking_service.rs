//! Ranking engine: leaderboards derived from the ledger aggregates.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::ledger_service::compute_totals_snapshot;
use crate::domain::models::Member;
use crate::domain::store::Store;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub member: Member,
    pub earned: i64,
    pub redeemed: i64,
    pub balance: i64,
}

#[derive(Clone)]
pub struct RankingService {
    store: Arc<Store>,
}

impl RankingService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Leaderboard over active members, optionally restricted to one unit
    /// (case-insensitive; `None` selects all units).
    ///
    /// Order: balance descending, earned descending, then name ascending.
    /// The final name tie-break makes the order total, so two calls over the
    /// same data always produce the same sequence.
    pub fn rank(&self, unit_filter: Option<&str>) -> Vec<RankEntry> {
        let wanted_unit = unit_filter.map(str::to_lowercase);
        self.store.read(|s| {
            let totals = compute_totals_snapshot(s);

            let mut rows: Vec<RankEntry> = s
                .members
                .iter()
                .filter(|m| m.active)
                .filter(|m| match &wanted_unit {
                    Some(unit) => m
                        .unit
                        .as_deref()
                        .map_or(false, |u| u.to_lowercase() == *unit),
                    None => true,
                })
                .map(|m| {
                    let t = totals.get(&m.id).copied().unwrap_or_default();
                    RankEntry {
                        member: m.clone(),
                        earned: t.earned,
                        redeemed: t.redeemed,
                        balance: t.balance,
                    }
                })
                .collect();

            rows.sort_by(|a, b| {
                b.balance
                    .cmp(&a.balance)
                    .then(b.earned.cmp(&a.earned))
                    .then(a.member.name.cmp(&b.member.name))
            });
            rows
        })
    }

    /// Distinct unit labels across the roster, trimmed and sorted, for the
    /// unit filter dropdown.
    pub fn units(&self) -> Vec<String> {
        self.store.read(|s| {
            s.members
                .iter()
                .filter_map(|m| m.unit.as_deref())
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::{AdjustmentDirection, CreateMemberCommand, RecordAdjustmentCommand};
    use crate::App;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = App::open(dir.path().join("state.json")).unwrap();
        (app, dir)
    }

    fn create_member(app: &App, name: &str, unit: Option<&str>) -> Member {
        app.members
            .create_member(CreateMemberCommand {
                name: name.to_string(),
                unit: unit.map(str::to_string),
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

    #[test]
    fn rank_orders_by_balance_then_earned_then_name() {
        let (app, _dir) = test_app();
        let ana = create_member(&app, "Ana", None);
        let bruno = create_member(&app, "Bruno", None);
        let carla = create_member(&app, "Carla", None);

        award(&app, &ana.id, 10);
        award(&app, &bruno.id, 30);
        award(&app, &carla.id, 10);

        let names: Vec<String> = app
            .ranking
            .rank(None)
            .into_iter()
            .map(|r| r.member.name)
            .collect();
        // Ana and Carla tie on (balance, earned); name breaks the tie.
        assert_eq!(names, vec!["Bruno", "Ana", "Carla"]);
    }

    #[test]
    fn equal_scores_always_order_by_name() {
        let (app, _dir) = test_app();
        create_member(&app, "Zoe", None);
        create_member(&app, "Ana", None);
        create_member(&app, "Mia", None);

        let first: Vec<String> = app.ranking.rank(None).into_iter().map(|r| r.member.name).collect();
        let second: Vec<String> = app.ranking.rank(None).into_iter().map(|r| r.member.name).collect();
        assert_eq!(first, vec!["Ana", "Mia", "Zoe"]);
        assert_eq!(first, second);
    }

    #[test]
    fn inactive_members_are_excluded() {
        let (app, _dir) = test_app();
        let ana = create_member(&app, "Ana", None);
        create_member(&app, "Bruno", None);
        app.members.set_member_active(&ana.id, false).unwrap();

        let rows = app.ranking.rank(None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member.name, "Bruno");
    }

    #[test]
    fn unit_filter_matches_case_insensitively() {
        let (app, _dir) = test_app();
        create_member(&app, "Ana", Some("Falcons"));
        create_member(&app, "Bruno", Some("Eagles"));
        create_member(&app, "Carla", None);

        let rows = app.ranking.rank(Some("falcons"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member.name, "Ana");

        // Members without a unit only show up for the all-units view.
        assert_eq!(app.ranking.rank(None).len(), 3);
    }

    #[test]
    fn rank_entries_carry_redeemed_totals() {
        let (app, _dir) = test_app();
        let ana = create_member(&app, "Ana", None);
        award(&app, &ana.id, 200);

        app.prizes
            .upsert_prize(crate::domain::commands::UpsertPrizeCommand {
                name: "Lantern".to_string(),
                season: crate::domain::models::Season::December,
                cost: 50,
                stock: 1,
                description: None,
            })
            .unwrap();
        let prize = &app.prizes.list_prizes(None)[0];
        app.redemptions
            .redeem_prize(crate::domain::commands::RedeemPrizeCommand {
                member_id: ana.id.clone(),
                prize_id: prize.id.clone(),
            })
            .unwrap();

        let rows = app.ranking.rank(None);
        assert_eq!(rows[0].earned, 200);
        assert_eq!(rows[0].redeemed, 50);
        assert_eq!(rows[0].balance, 150);
    }

    #[test]
    fn units_are_deduplicated_and_sorted() {
        let (app, _dir) = test_app();
        create_member(&app, "Ana", Some("Falcons"));
        create_member(&app, "Bruno", Some("Eagles"));
        create_member(&app, "Carla", Some("Falcons"));
        create_member(&app, "Dana", None);

        assert_eq!(app.ranking.units(), vec!["Eagles", "Falcons"]);
    }
}
