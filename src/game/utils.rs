use rand::Rng;

use super::error::{GameError, GameResult};
use super::state::GameState;
use super::types::Position;
use crate::config::game::MAX_PLACEMENT_ATTEMPTS;

/// Uniformly random tile with no player, airstrike, bomb or loot on it.
///
/// Rejection sampling, bounded by `MAX_PLACEMENT_ATTEMPTS` draws.
pub fn free_random_tile(game_state: &mut GameState) -> GameResult<Position> {
    let size = game_state.settings.grid_size;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Position::new(
            game_state.rng.random_range(0..size),
            game_state.rng.random_range(0..size),
        );
        if !game_state.is_tile_taken(pos) {
            return Ok(pos);
        }
    }
    Err(GameError::ArenaFull {
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}
