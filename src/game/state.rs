use std::collections::BTreeMap;

use log::warn;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::settings::Settings;
use crate::game::bestlist::BestList;
use crate::game::events::EventLog;
use crate::game::grid::Grid;
use crate::game::input::InputBuffer;
use crate::game::systems::replenish_loot;
use crate::game::types::{
    Airstrike, Bomb, Corpse, EntityId, Explosion, Loot, Player, PlayerId, Position,
};

/// Why the host should drop a player's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisconnectReason {
    /// Health reached zero.
    Sunk,
    /// A join could not be placed on the board.
    ArenaFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnect {
    pub player_id: PlayerId,
    pub reason: DisconnectReason,
}

/// The whole simulated world.
///
/// Every entity kind has a registry (authoritative) and a grid indexing the same
/// ids by tile. Lifecycle functions in [`crate::game::entities`] update both in
/// one step; nothing else writes to the grids.
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    pub tick: u64,

    pub players: BTreeMap<PlayerId, Player>,
    pub airstrikes: BTreeMap<EntityId, Airstrike>,
    pub bombs: BTreeMap<EntityId, Bomb>,
    pub explosions: BTreeMap<EntityId, Explosion>,
    pub corpses: BTreeMap<EntityId, Corpse>,
    pub loot: BTreeMap<EntityId, Loot>,

    pub player_grid: Grid<PlayerId>,
    pub airstrike_grid: Grid<EntityId>,
    pub bomb_grid: Grid<EntityId>,
    pub explosion_grid: Grid<EntityId>,
    pub corpse_grid: Grid<EntityId>,
    pub loot_grid: Grid<EntityId>,

    pub inputs: InputBuffer,
    pub events: EventLog,
    pub best: BestList,

    pub(crate) rng: StdRng,
    next_id: EntityId,
    disconnects: UnboundedSender<Disconnect>,
}

impl GameState {
    /// Fresh world with its standing loot already on the field.
    pub fn new(settings: Settings, rng: StdRng, disconnects: UnboundedSender<Disconnect>) -> Self {
        let size = settings.grid_size;
        let mut state = GameState {
            settings,
            tick: 0,
            players: BTreeMap::new(),
            airstrikes: BTreeMap::new(),
            bombs: BTreeMap::new(),
            explosions: BTreeMap::new(),
            corpses: BTreeMap::new(),
            loot: BTreeMap::new(),
            player_grid: Grid::new(size),
            airstrike_grid: Grid::new(size),
            bomb_grid: Grid::new(size),
            explosion_grid: Grid::new(size),
            corpse_grid: Grid::new(size),
            loot_grid: Grid::new(size),
            inputs: InputBuffer::new(),
            events: EventLog::new(),
            best: BestList::new(),
            rng,
            next_id: 1,
            disconnects,
        };
        replenish_loot(&mut state);
        state
    }

    /// Hand out the next entity id. Ids are never reused.
    pub fn new_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Step from `pos` in direction `(dx, dy)`, `None` if that leaves the board.
    pub fn offset(&self, pos: Position, dx: isize, dy: isize) -> Option<Position> {
        let x = pos.x as isize + dx;
        let y = pos.y as isize + dy;
        if self.player_grid.in_bounds(x, y) {
            Some(Position::new(x as usize, y as usize))
        } else {
            None
        }
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        self.player_grid.in_bounds(x, y)
    }

    /// Tile blocked for new spawns. Corpses and explosions never block.
    pub fn is_tile_taken(&self, pos: Position) -> bool {
        self.player_grid.is_occupied(pos)
            || self.airstrike_grid.is_occupied(pos)
            || self.bomb_grid.is_occupied(pos)
            || self.loot_grid.is_occupied(pos)
    }

    /// Queue a disconnect for the host. Never blocks.
    pub fn notify_disconnect(&self, player_id: PlayerId, reason: DisconnectReason) {
        if self.disconnects.send(Disconnect { player_id, reason }).is_err() {
            warn!(
                "[GameState] Disconnect receiver closed, dropped {:?} for player {}",
                reason, player_id
            );
        }
    }
}
