//! Entity records owned by the arena world.
//!
//! Every positioned entity lives in its kind's registry and, under the same id,
//! in its kind's grid (see [`crate::game::grid`]).

use serde::{Deserialize, Serialize};

/// Id handed out by the world to airstrikes, bombs, explosions, corpses and loot.
pub type EntityId = u64;

/// Id of a connected player, assigned by the host at connection time.
pub type PlayerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for this direction. `y` grows downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    #[serde(flatten)]
    pub pos: Position,
    #[serde(rename = "rotation")]
    pub facing: Direction,
    pub health: i32,
    pub bomb_count: u32,
    pub charging: bool,
    pub score: i64,
}

impl Player {
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airstrike {
    pub id: EntityId,
    #[serde(flatten)]
    pub pos: Position,
    #[serde(rename = "fuseCount")]
    pub fuse: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bomb {
    pub id: EntityId,
    pub owner: PlayerId,
    #[serde(flatten)]
    pub pos: Position,
    #[serde(rename = "fuseCount")]
    pub fuse: u32,
}

/// Who caused an explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "playerId")]
pub enum Origin {
    /// Environmental hazard, not attributable to any player.
    Airstrike,
    Player(PlayerId),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explosion {
    pub id: EntityId,
    #[serde(flatten)]
    pub pos: Position,
    pub origin: Origin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corpse {
    pub id: EntityId,
    pub name: String,
    #[serde(flatten)]
    pub pos: Position,
    #[serde(rename = "rotation")]
    pub facing: Direction,
    pub death_timer: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LootKind {
    Mediocre,
    Good,
}

impl std::fmt::Display for LootKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LootKind::Mediocre => write!(f, "mediocre"),
            LootKind::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loot {
    pub id: EntityId,
    pub kind: LootKind,
    pub value: i64,
    #[serde(flatten)]
    pub pos: Position,
}
