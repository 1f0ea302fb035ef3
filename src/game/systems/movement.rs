//! Player movement system.
//!
//! This module handles moving players on the grid.

use crate::game::state::GameState;
use crate::game::types::{Direction, PlayerId};

/// Move the specified player one tile in the given direction.
///
/// The move is rejected if it would leave the board or run into another
/// player. A successful move also turns the player to face `direction`.
/// Returns whether the player moved.
pub fn move_player(game_state: &mut GameState, player_id: PlayerId, direction: Direction) -> bool {
    let Some(player) = game_state.players.get(&player_id) else {
        return false;
    };
    let from = player.pos;
    let (dx, dy) = direction.delta();

    let Some(to) = game_state.offset(from, dx, dy) else {
        return false;
    };
    if game_state.player_grid.is_occupied(to) {
        return false;
    }

    game_state.player_grid.clear(from, player_id);
    game_state.player_grid.place(to, player_id);
    if let Some(player) = game_state.players.get_mut(&player_id) {
        player.pos = to;
        player.facing = direction;
    }
    true
}
