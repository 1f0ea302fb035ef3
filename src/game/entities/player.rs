use log::{debug, info};

use crate::game::error::GameResult;
use crate::game::state::GameState;
use crate::game::types::{Direction, Player, PlayerId};
use crate::game::utils::free_random_tile;

/// Place a new player on a random free tile with full health and inventory.
///
/// A join for a player that is already on the board is ignored.
pub fn spawn_player(
    game_state: &mut GameState,
    id: PlayerId,
    name: String,
    team: String,
) -> GameResult<()> {
    if game_state.players.contains_key(&id) {
        debug!("[Player] Ignoring join for player {} already in the arena", id);
        return Ok(());
    }

    let pos = free_random_tile(game_state)?;
    let player = Player {
        id,
        name,
        team,
        pos,
        facing: Direction::Left,
        health: game_state.settings.start_health,
        bomb_count: game_state.settings.inventory_size,
        charging: false,
        score: 0,
    };

    game_state.player_grid.place(pos, id);
    game_state.events.push(format!("{} joined", player.name));
    info!("[Player] {} joined as player {} at ({}, {})", player.name, id, pos.x, pos.y);
    game_state.players.insert(id, player);
    Ok(())
}

/// Take a player off the board and record its result. Missing players are a no-op.
pub fn sink_ship(game_state: &mut GameState, id: PlayerId) -> Option<Player> {
    let player = game_state.players.remove(&id)?;
    game_state.player_grid.clear(player.pos, id);
    game_state.best.record(&player.name, player.score);
    debug!("[Player] Removed player {} ({}) with score {}", id, player.name, player.score);
    Some(player)
}

/// Flag the player as charging; the laser fires on the next tick.
pub fn charge_laser(game_state: &mut GameState, id: PlayerId) {
    if let Some(player) = game_state.players.get_mut(&id) {
        player.charging = true;
    }
}
