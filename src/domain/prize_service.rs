//! Prize catalog management.
//!
//! Prizes have no deactivation; a prize stops being redeemable only when its
//! stock reaches zero. Stock itself is mutated exclusively by the redemption
//! service.

use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::domain::commands::UpsertPrizeCommand;
use crate::domain::errors::{DomainError, Result};
use crate::domain::models::{Prize, Season};
use crate::domain::store::Store;

#[derive(Clone)]
pub struct PrizeService {
    store: Arc<Store>,
}

impl PrizeService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a prize, or update the existing one when `(name, season)`
    /// matches. The name match is case-insensitive; cost, stock, and
    /// description are overwritten in place, identity is kept.
    pub fn upsert_prize(&self, command: UpsertPrizeCommand) -> Result<Prize> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("prize name is required"));
        }
        if command.cost <= 0 {
            return Err(DomainError::validation("prize cost must be positive"));
        }
        let description = command
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let lowered = name.to_lowercase();
        let prize = self.store.mutate(|s| {
            if let Some(existing) = s
                .prizes
                .iter_mut()
                .find(|p| p.season == command.season && p.name.to_lowercase() == lowered)
            {
                existing.cost = command.cost;
                existing.stock = command.stock;
                existing.description = description;
                Ok(existing.clone())
            } else {
                let now_millis = Utc::now().timestamp_millis() as u64;
                let prize = Prize {
                    id: Prize::generate_id(now_millis),
                    name,
                    season: command.season,
                    cost: command.cost,
                    stock: command.stock,
                    description,
                };
                s.prizes.push(prize.clone());
                Ok(prize)
            }
        })?;

        info!("Upserted prize {} ({}, {})", prize.name, prize.id, prize.season);
        Ok(prize)
    }

    pub fn get_prize(&self, prize_id: &str) -> Result<Prize> {
        self.store.read(|s| {
            s.prizes
                .iter()
                .find(|p| p.id == prize_id)
                .cloned()
                .ok_or_else(|| DomainError::not_found("prize", prize_id))
        })
    }

    /// Prize catalog, optionally filtered by season, sorted the way the
    /// prize table displays: season, then cost, then name.
    pub fn list_prizes(&self, season: Option<Season>) -> Vec<Prize> {
        self.store.read(|s| {
            let mut prizes: Vec<Prize> = s
                .prizes
                .iter()
                .filter(|p| season.map_or(true, |wanted| p.season == wanted))
                .cloned()
                .collect();
            prizes.sort_by(|a, b| {
                a.season
                    .cmp(&b.season)
                    .then(a.cost.cmp(&b.cost))
                    .then(a.name.cmp(&b.name))
            });
            prizes
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::App;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let app = App::open(dir.path().join("state.json")).unwrap();
        (app, dir)
    }

    fn upsert_command(name: &str, season: Season, cost: i64, stock: u32) -> UpsertPrizeCommand {
        UpsertPrizeCommand {
            name: name.to_string(),
            season,
            cost,
            stock,
            description: None,
        }
    }

    #[test]
    fn upsert_rejects_non_positive_cost() {
        let (app, _dir) = test_app();
        let result = app.prizes.upsert_prize(upsert_command("Flashlight", Season::December, 0, 2));
        assert!(matches!(result, Err(DomainError::Validation(_))));
        let result = app.prizes.upsert_prize(upsert_command("Flashlight", Season::December, -5, 2));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn upsert_matching_name_and_season_updates_in_place() {
        let (app, _dir) = test_app();
        let first = app
            .prizes
            .upsert_prize(upsert_command("Paracord bracelet", Season::September, 180, 3))
            .unwrap();

        // Case-insensitive name match, same season: overwrite, keep identity.
        let second = app
            .prizes
            .upsert_prize(upsert_command("PARACORD BRACELET", Season::September, 200, 5))
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.cost, 200);
        assert_eq!(second.stock, 5);
        assert_eq!(app.prizes.list_prizes(None).len(), 1);
    }

    #[test]
    fn same_name_different_season_creates_separate_prize() {
        let (app, _dir) = test_app();
        let sep = app
            .prizes
            .upsert_prize(upsert_command("Gift card", Season::September, 100, 1))
            .unwrap();
        let dec = app
            .prizes
            .upsert_prize(upsert_command("Gift card", Season::December, 380, 2))
            .unwrap();

        assert_ne!(sep.id, dec.id);
        assert_eq!(app.prizes.list_prizes(None).len(), 2);
        assert_eq!(app.prizes.list_prizes(Some(Season::December)).len(), 1);
    }

    #[test]
    fn list_prizes_sorts_by_season_cost_name() {
        let (app, _dir) = test_app();
        app.prizes.upsert_prize(upsert_command("Lantern", Season::December, 280, 2)).unwrap();
        app.prizes.upsert_prize(upsert_command("Gift card", Season::December, 380, 2)).unwrap();
        app.prizes.upsert_prize(upsert_command("Bracelet", Season::September, 180, 3)).unwrap();

        let names: Vec<String> = app.prizes.list_prizes(None).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Bracelet", "Lantern", "Gift card"]);
    }
}
