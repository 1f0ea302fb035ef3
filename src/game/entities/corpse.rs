use log::debug;

use crate::game::state::GameState;
use crate::game::types::{Corpse, EntityId, Player};

/// Leave the remains of a sunk player on its last tile.
/// An older corpse on the same tile is replaced.
pub fn spawn_corpse(game_state: &mut GameState, player: &Player) {
    if let Some(previous) = game_state.corpse_grid.occupant(player.pos) {
        remove_corpse(game_state, previous);
    }

    let id = game_state.new_id();
    game_state.corpse_grid.place(player.pos, id);
    game_state.corpses.insert(
        id,
        Corpse {
            id,
            name: player.name.clone(),
            pos: player.pos,
            facing: player.facing,
            death_timer: game_state.settings.death_time,
        },
    );
    game_state.events.push(format!("{} died", player.name));
    debug!("[Corpse] {} at ({}, {})", id, player.pos.x, player.pos.y);
}

pub fn remove_corpse(game_state: &mut GameState, id: EntityId) {
    if let Some(corpse) = game_state.corpses.remove(&id) {
        game_state.corpse_grid.clear(corpse.pos, id);
    }
}
