//! Owned, serializable copy of the world for clients.

use serde::{Deserialize, Serialize};

use crate::config::settings::Settings;
use crate::game::bestlist::BestEntry;
use crate::game::state::GameState;
use crate::game::types::{Airstrike, Bomb, Corpse, Explosion, Loot, Player};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub players: Vec<Player>,
    pub airstrikes: Vec<Airstrike>,
    pub explosions: Vec<Explosion>,
    pub bombs: Vec<Bomb>,
    pub corpses: Vec<Corpse>,
    pub loot: Vec<Loot>,
    /// Players on the board, best score first.
    pub leaderboard: Vec<Score>,
    /// All-time best results of players that left.
    pub kings: Vec<BestEntry>,
    /// Newest first.
    pub events: Vec<String>,
    pub settings: Settings,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        let mut leaderboard: Vec<Score> = state
            .players
            .values()
            .map(|p| Score {
                name: p.name.clone(),
                score: p.score,
            })
            .collect();
        leaderboard.sort_by(|a, b| b.score.cmp(&a.score));

        Snapshot {
            tick: state.tick,
            players: state.players.values().cloned().collect(),
            airstrikes: state.airstrikes.values().cloned().collect(),
            explosions: state.explosions.values().cloned().collect(),
            bombs: state.bombs.values().cloned().collect(),
            corpses: state.corpses.values().cloned().collect(),
            loot: state.loot.values().cloned().collect(),
            leaderboard,
            kings: state.best.top().to_vec(),
            events: state.events.to_vec(),
            settings: state.settings.clone(),
        }
    }
}
