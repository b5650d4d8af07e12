//! Scoring configuration access and updates.

use log::info;
use std::sync::Arc;

use crate::domain::commands::UpdateConfigCommand;
use crate::domain::errors::Result;
use crate::domain::models::Config;
use crate::domain::store::Store;

#[derive(Clone)]
pub struct ConfigService {
    store: Arc<Store>,
}

impl ConfigService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn get_config(&self) -> Config {
        self.store.read(|s| s.config.clone())
    }

    /// Apply a partial update. A blank season label keeps the current one,
    /// matching the settings form behavior.
    pub fn update_config(&self, command: UpdateConfigCommand) -> Result<Config> {
        let config = self.store.mutate(|s| {
            if let Some(label) = command.season_label {
                let label = label.trim().to_string();
                if !label.is_empty() {
                    s.config.season_label = label;
                }
            }
            if let Some(points) = command.points {
                s.config.points = points;
            }
            if let Some(block) = command.block_redeem_if_insufficient {
                s.config.block_redeem_if_insufficient = block;
            }
            Ok(s.config.clone())
        })?;

        info!("Updated configuration (season {})", config.season_label);
        Ok(config)
    }
}
