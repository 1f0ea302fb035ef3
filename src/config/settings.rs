//! Per-arena settings, fixed for the lifetime of a game.
//!
//! Sent to clients as part of every snapshot so they can size the board.

use std::env;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::game::{
    DEFAULT_AIRSTRIKE_FUSE_LENGTH, DEFAULT_BOMB_FUSE_LENGTH, DEFAULT_DEATH_TIME,
    DEFAULT_GRID_SIZE, DEFAULT_INVENTORY_SIZE, DEFAULT_START_HEALTH,
};
use crate::game::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub grid_size: usize,
    pub start_health: i32,
    pub inventory_size: u32,
    pub bomb_fuse_length: u32,
    pub airstrike_fuse_length: u32,
    pub death_time: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start_health: DEFAULT_START_HEALTH,
            inventory_size: DEFAULT_INVENTORY_SIZE,
            bomb_fuse_length: DEFAULT_BOMB_FUSE_LENGTH,
            airstrike_fuse_length: DEFAULT_AIRSTRIKE_FUSE_LENGTH,
            death_time: DEFAULT_DEATH_TIME,
        }
    }
}

impl Settings {
    /// Defaults overridden by `ARENA_*` environment variables, then validated.
    pub fn from_env() -> GameResult<Self> {
        let defaults = Self::default();
        let settings = Self {
            grid_size: env_or("ARENA_GRID_SIZE", defaults.grid_size),
            start_health: env_or("ARENA_START_HEALTH", defaults.start_health),
            inventory_size: env_or("ARENA_INVENTORY_SIZE", defaults.inventory_size),
            bomb_fuse_length: env_or("ARENA_BOMB_FUSE", defaults.bomb_fuse_length),
            airstrike_fuse_length: env_or("ARENA_AIRSTRIKE_FUSE", defaults.airstrike_fuse_length),
            death_time: env_or("ARENA_DEATH_TIME", defaults.death_time),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.grid_size < 2 {
            return Err(GameError::InvalidSettings(format!(
                "grid size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.start_health < 1 {
            return Err(GameError::InvalidSettings(format!(
                "start health must be positive, got {}",
                self.start_health
            )));
        }
        if self.bomb_fuse_length == 0 || self.airstrike_fuse_length == 0 {
            return Err(GameError::InvalidSettings("fuse lengths must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("[Settings] Ignoring unparsable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}
