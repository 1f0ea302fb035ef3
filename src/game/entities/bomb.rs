//! Bombs dropped by players.

use log::debug;

use crate::game::entities::explosion::explode_cross;
use crate::game::error::{GameError, GameResult};
use crate::game::state::GameState;
use crate::game::types::{Bomb, EntityId, Origin, PlayerId};

/// Drop a bomb under the player.
/// Does nothing if the tile already holds a bomb or the player has none left.
pub fn spawn_bomb(game_state: &mut GameState, player_id: PlayerId) {
    let Some(player) = game_state.players.get(&player_id) else {
        return;
    };
    let pos = player.pos;
    if player.bomb_count == 0 || game_state.bomb_grid.is_occupied(pos) {
        return;
    }

    let id = game_state.new_id();
    game_state.bomb_grid.place(pos, id);
    game_state.bombs.insert(
        id,
        Bomb {
            id,
            owner: player_id,
            pos,
            fuse: game_state.settings.bomb_fuse_length,
        },
    );
    if let Some(player) = game_state.players.get_mut(&player_id) {
        player.bomb_count -= 1;
        debug!("[Bomb] {} dropped bomb {} at ({}, {})", player.name, id, pos.x, pos.y);
    }
}

/// Remove the bomb, give it back to its owner and blow up its row and column.
///
/// If the owner already left the arena the inventory credit is dropped and
/// `UnknownPlayer` is returned; the explosions still happen and count as the
/// owner's.
pub fn detonate_bomb(game_state: &mut GameState, id: EntityId) -> GameResult<()> {
    let Some(bomb) = game_state.bombs.remove(&id) else {
        return Ok(());
    };
    game_state.bomb_grid.clear(bomb.pos, id);

    let inventory_size = game_state.settings.inventory_size;
    let credited = match game_state.players.get_mut(&bomb.owner) {
        Some(owner) => {
            owner.bomb_count = (owner.bomb_count + 1).min(inventory_size);
            Ok(())
        }
        None => Err(GameError::UnknownPlayer(bomb.owner)),
    };

    explode_cross(game_state, bomb.pos, Origin::Player(bomb.owner));
    credited
}
