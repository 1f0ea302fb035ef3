use log::debug;

use crate::game::entities::explosion::explode_cross;
use crate::game::error::GameResult;
use crate::game::state::GameState;
use crate::game::types::{Airstrike, EntityId, Origin};
use crate::game::utils::free_random_tile;

/// Mark a random free tile for an incoming airstrike.
pub fn spawn_airstrike(game_state: &mut GameState) -> GameResult<EntityId> {
    let pos = free_random_tile(game_state)?;
    let id = game_state.new_id();
    game_state.airstrike_grid.place(pos, id);
    game_state.airstrikes.insert(
        id,
        Airstrike {
            id,
            pos,
            fuse: game_state.settings.airstrike_fuse_length,
        },
    );
    debug!("[Airstrike] Spawned {} at ({}, {})", id, pos.x, pos.y);
    Ok(id)
}

pub fn detonate_airstrike(game_state: &mut GameState, id: EntityId) {
    let Some(airstrike) = game_state.airstrikes.remove(&id) else {
        return;
    };
    game_state.airstrike_grid.clear(airstrike.pos, id);
    explode_cross(game_state, airstrike.pos, Origin::Airstrike);
}
