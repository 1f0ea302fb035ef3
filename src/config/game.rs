/// Game configuration constants.
///
/// Scoring, loot economy and the default values for [`super::settings::Settings`].
pub const SCORE_GAIN_TURN: i64 = 1; // Score for surviving a tick.

/// Score for landing a hit on a player (self-hits included).
pub const SCORE_GAIN_HIT: i64 = 5;

/// Score granted by picking up loot, per kind.
pub const SCORE_GAIN_MEDIOCRE_LOOT: i64 = 6;
pub const SCORE_GAIN_GOOD_LOOT: i64 = 12;

/// Standing loot inventory kept on the field between ticks.
pub const MEDIOCRE_LOOT_COUNT: usize = 3;
pub const GOOD_LOOT_COUNT: usize = 1;

/// Health lost when standing on an explosion.
pub const HIT_DAMAGE: i32 = 1;

/// Number of recent events kept for display.
pub const MAX_EVENTS: usize = 8;

/// Number of all-time best results kept.
pub const BEST_LIST_SIZE: usize = 3;

/// Random draws attempted before a spawn gives up on finding a free tile.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

pub const DEFAULT_GRID_SIZE: usize = 12;
pub const DEFAULT_START_HEALTH: i32 = 3;
pub const DEFAULT_INVENTORY_SIZE: u32 = 2;
pub const DEFAULT_BOMB_FUSE_LENGTH: u32 = 3;
pub const DEFAULT_AIRSTRIKE_FUSE_LENGTH: u32 = 4;
pub const DEFAULT_DEATH_TIME: u32 = 5;
