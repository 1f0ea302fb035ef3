use log::debug;

use crate::config::game::{SCORE_GAIN_GOOD_LOOT, SCORE_GAIN_MEDIOCRE_LOOT};
use crate::game::error::GameResult;
use crate::game::state::GameState;
use crate::game::types::{EntityId, Loot, LootKind};
use crate::game::utils::free_random_tile;

impl LootKind {
    pub fn value(self) -> i64 {
        match self {
            LootKind::Mediocre => SCORE_GAIN_MEDIOCRE_LOOT,
            LootKind::Good => SCORE_GAIN_GOOD_LOOT,
        }
    }
}

/// Drop a piece of loot on a random free tile.
pub fn spawn_loot(game_state: &mut GameState, kind: LootKind) -> GameResult<EntityId> {
    let pos = free_random_tile(game_state)?;
    let id = game_state.new_id();
    game_state.loot_grid.place(pos, id);
    game_state.loot.insert(
        id,
        Loot {
            id,
            kind,
            value: kind.value(),
            pos,
        },
    );
    debug!("[Loot] Spawned {} loot {} at ({}, {})", kind, id, pos.x, pos.y);
    Ok(id)
}

pub fn remove_loot(game_state: &mut GameState, id: EntityId) -> Option<Loot> {
    let loot = game_state.loot.remove(&id)?;
    game_state.loot_grid.clear(loot.pos, id);
    Some(loot)
}
