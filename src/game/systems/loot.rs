//! Loot pickups and the standing loot quota.

use log::warn;

use crate::config::game::{GOOD_LOOT_COUNT, MEDIOCRE_LOOT_COUNT};
use crate::game::entities::{remove_loot, spawn_loot};
use crate::game::state::GameState;
use crate::game::types::{EntityId, LootKind, PlayerId};

/// Award loot to whoever stands on it and take it off the board.
pub fn collect_loot(game_state: &mut GameState) {
    let pickups: Vec<(EntityId, PlayerId)> = game_state
        .loot
        .values()
        .filter_map(|l| game_state.player_grid.occupant(l.pos).map(|p| (l.id, p)))
        .collect();

    for (loot_id, player_id) in pickups {
        let Some(loot) = remove_loot(game_state, loot_id) else {
            continue;
        };
        if let Some(player) = game_state.players.get_mut(&player_id) {
            player.score += loot.value;
            let event = format!("{} found some {} loot", player.name, loot.kind);
            game_state.events.push(event);
        }
    }
}

/// Spawn one loot per missing slot of the standing quota.
pub fn replenish_loot(game_state: &mut GameState) {
    for (kind, standing) in [
        (LootKind::Mediocre, MEDIOCRE_LOOT_COUNT),
        (LootKind::Good, GOOD_LOOT_COUNT),
    ] {
        let present = game_state.loot.values().filter(|l| l.kind == kind).count();
        for _ in present..standing {
            if let Err(e) = spawn_loot(game_state, kind) {
                warn!("[Loot] Could not place {} loot, retrying next tick: {}", kind, e);
                break;
            }
        }
    }
}
