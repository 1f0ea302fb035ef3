//! Hit detection, deaths and survival score.

use log::info;

use crate::config::game::{HIT_DAMAGE, SCORE_GAIN_HIT, SCORE_GAIN_TURN};
use crate::game::entities::{sink_ship, spawn_corpse};
use crate::game::state::{DisconnectReason, GameState};
use crate::game::types::{Origin, PlayerId};

/// Damage every living player standing in an explosion and credit the shooter.
pub fn resolve_hits(game_state: &mut GameState) {
    let hits: Vec<(PlayerId, Origin)> = game_state
        .players
        .values()
        .filter(|p| !p.is_dead())
        .filter_map(|p| {
            let explosion_id = game_state.explosion_grid.occupant(p.pos)?;
            game_state.explosions.get(&explosion_id).map(|e| (p.id, e.origin))
        })
        .collect();

    for (victim_id, origin) in hits {
        let victim_name = match game_state.players.get_mut(&victim_id) {
            Some(victim) => {
                victim.health -= HIT_DAMAGE;
                victim.name.clone()
            }
            None => continue,
        };

        let event = match origin {
            Origin::Player(hitter_id) => match game_state.players.get_mut(&hitter_id) {
                Some(hitter) => {
                    hitter.score += SCORE_GAIN_HIT;
                    if hitter_id == victim_id {
                        format!("{} hurt itself in confusion", victim_name)
                    } else {
                        format!("{} got hit by {}", victim_name, hitter.name)
                    }
                }
                // Shooter already left the arena; nobody to credit.
                None => format!("{} took a hit", victim_name),
            },
            Origin::Airstrike => format!("{} took a hit", victim_name),
        };
        info!("[Combat] {}", event);
        game_state.events.push(event);
    }
}

/// Sink every player out of health, leave a corpse and ask the host to drop
/// the connection. Returns the sunk players.
pub fn sink_dead_players(game_state: &mut GameState) -> Vec<PlayerId> {
    let dead: Vec<PlayerId> = game_state
        .players
        .values()
        .filter(|p| p.is_dead())
        .map(|p| p.id)
        .collect();

    for &id in &dead {
        if let Some(player) = sink_ship(game_state, id) {
            spawn_corpse(game_state, &player);
            info!("[Combat] {} sank with score {}", player.name, player.score);
            game_state.notify_disconnect(id, DisconnectReason::Sunk);
        }
    }
    dead
}

pub fn grant_survival_score(game_state: &mut GameState) {
    for player in game_state.players.values_mut() {
        player.score += SCORE_GAIN_TURN;
    }
}
