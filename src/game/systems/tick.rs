//! One simulation tick.
//!
//! The order of the phases below is the game's turn semantics: moves happen
//! before hazards, lasers charged last tick fire before hits are counted, and
//! new players only appear once every hazard of the tick has been resolved.

use log::{debug, warn};

use crate::game::entities::{
    charge_laser, clear_explosions, detonate_airstrike, detonate_bomb, fire_laser,
    remove_corpse, spawn_airstrike, spawn_bomb, spawn_player,
};
use crate::game::input::{Action, Input};
use crate::game::state::{DisconnectReason, GameState};
use crate::game::systems::{
    collect_loot, grant_survival_score, move_player, replenish_loot, resolve_hits,
    sink_dead_players,
};
use crate::game::types::{EntityId, PlayerId};

/// Advance the world by exactly one tick. The caller holds the world lock.
pub fn run_tick(game_state: &mut GameState) {
    let inputs = game_state.inputs.ordered();

    apply_inputs(game_state, &inputs);

    if let Err(e) = spawn_airstrike(game_state) {
        warn!("[Tick] Skipping airstrike: {}", e);
    }

    clear_explosions(game_state);
    decay_corpses(game_state);
    burn_fuses(game_state);
    fire_charged_lasers(game_state);

    resolve_hits(game_state);
    sink_dead_players(game_state);
    grant_survival_score(game_state);

    for input in &inputs {
        if input.action == Action::Laser {
            charge_laser(game_state, input.player_id);
        }
    }

    collect_loot(game_state);
    replenish_loot(game_state);

    admit_joins(game_state, &inputs);

    game_state.inputs.clear();
    game_state.tick += 1;
    debug!(
        "[Tick] {} done: players={} airstrikes={} bombs={} explosions={}",
        game_state.tick,
        game_state.players.len(),
        game_state.airstrikes.len(),
        game_state.bombs.len(),
        game_state.explosions.len()
    );
}

/// Moves and bomb drops, in arrival order. Players that are gone, dead or
/// charging their laser are skipped.
fn apply_inputs(game_state: &mut GameState, inputs: &[Input]) {
    for input in inputs {
        let can_act = game_state
            .players
            .get(&input.player_id)
            .is_some_and(|p| !p.is_dead() && !p.charging);
        if !can_act {
            continue;
        }

        match &input.action {
            Action::Move(direction) => {
                move_player(game_state, input.player_id, *direction);
            }
            Action::Bomb => spawn_bomb(game_state, input.player_id),
            Action::Laser | Action::Join { .. } => {}
        }
    }
}

fn decay_corpses(game_state: &mut GameState) {
    let mut expired: Vec<EntityId> = Vec::new();
    for corpse in game_state.corpses.values_mut() {
        corpse.death_timer = corpse.death_timer.saturating_sub(1);
        if corpse.death_timer == 0 {
            expired.push(corpse.id);
        }
    }
    for id in expired {
        remove_corpse(game_state, id);
    }
}

/// Shorten every fuse and detonate the ones that ran out.
fn burn_fuses(game_state: &mut GameState) {
    let mut airstrikes: Vec<EntityId> = Vec::new();
    for airstrike in game_state.airstrikes.values_mut() {
        airstrike.fuse = airstrike.fuse.saturating_sub(1);
        if airstrike.fuse == 0 {
            airstrikes.push(airstrike.id);
        }
    }
    for id in airstrikes {
        detonate_airstrike(game_state, id);
    }

    let mut bombs: Vec<EntityId> = Vec::new();
    for bomb in game_state.bombs.values_mut() {
        bomb.fuse = bomb.fuse.saturating_sub(1);
        if bomb.fuse == 0 {
            bombs.push(bomb.id);
        }
    }
    for id in bombs {
        if let Err(e) = detonate_bomb(game_state, id) {
            warn!("[Tick] Bomb {} credit dropped: {}", id, e);
        }
    }
}

fn fire_charged_lasers(game_state: &mut GameState) {
    let charged: Vec<PlayerId> = game_state
        .players
        .values()
        .filter(|p| p.charging)
        .map(|p| p.id)
        .collect();
    for id in charged {
        fire_laser(game_state, id);
    }
}

fn admit_joins(game_state: &mut GameState, inputs: &[Input]) {
    for input in inputs {
        let Action::Join { name, team } = &input.action else {
            continue;
        };
        if let Err(e) = spawn_player(game_state, input.player_id, name.clone(), team.clone()) {
            warn!("[Tick] Could not admit {} (player {}): {}", name, input.player_id, e);
            game_state.notify_disconnect(input.player_id, DisconnectReason::ArenaFull);
        }
    }
}
