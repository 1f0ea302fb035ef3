//! Explosions: one-tick hazards and the only source of damage.

use log::debug;

use crate::game::state::GameState;
use crate::game::types::{EntityId, Explosion, Origin, PlayerId, Position};

/// Put an explosion on `(x, y)`.
///
/// Out-of-bounds tiles are ignored. A tile that already burns this tick keeps its
/// first explosion, so a player is damaged at most once per tile.
pub fn spawn_explosion(game_state: &mut GameState, x: isize, y: isize, origin: Origin) {
    if !game_state.in_bounds(x, y) {
        return;
    }
    let pos = Position::new(x as usize, y as usize);
    if game_state.explosion_grid.is_occupied(pos) {
        return;
    }

    let id: EntityId = game_state.new_id();
    game_state.explosion_grid.place(pos, id);
    game_state.explosions.insert(id, Explosion { id, pos, origin });
    debug!("[Explosion] {} at ({}, {}) from {:?}", id, pos.x, pos.y, origin);
}

/// Explode the whole row and column through `center`.
pub fn explode_cross(game_state: &mut GameState, center: Position, origin: Origin) {
    let size = game_state.settings.grid_size as isize;
    for i in 0..size {
        spawn_explosion(game_state, center.x as isize, i, origin);
        spawn_explosion(game_state, i, center.y as isize, origin);
    }
}

/// Fire a charging player's laser from the tile in front of it to the edge.
pub fn fire_laser(game_state: &mut GameState, player_id: PlayerId) {
    let Some(player) = game_state.players.get_mut(&player_id) else {
        return;
    };
    player.charging = false;
    let (start, facing) = (player.pos, player.facing);

    let (dx, dy) = facing.delta();
    let (mut x, mut y) = (start.x as isize + dx, start.y as isize + dy);
    while game_state.in_bounds(x, y) {
        spawn_explosion(game_state, x, y, Origin::Player(player_id));
        x += dx;
        y += dy;
    }
    debug!("[Explosion] Player {} fired laser {:?}", player_id, facing);
}

/// Drop every explosion from the previous tick.
pub fn clear_explosions(game_state: &mut GameState) {
    game_state.explosions.clear();
    game_state.explosion_grid.reset();
}

