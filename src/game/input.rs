//! Pending player input, one slot per player per tick.

use std::collections::HashMap;
use std::time::Instant;

use crate::game::types::{Direction, PlayerId};

/// What a player asked to do this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Bomb,
    /// Charge the laser now, fire it at the start of next tick's hazards.
    Laser,
    Join { name: String, team: String },
}

#[derive(Debug, Clone)]
pub struct Input {
    pub player_id: PlayerId,
    pub action: Action,
    pub received_at: Instant,
    seq: u64,
}

/// Latest action per player, ordered by arrival when drained.
#[derive(Debug, Default)]
pub struct InputBuffer {
    pending: HashMap<PlayerId, Input>,
    next_seq: u64,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `action` for `player_id`, replacing whatever it sent earlier this tick.
    pub fn store(&mut self, player_id: PlayerId, action: Action, received_at: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            player_id,
            Input {
                player_id,
                action,
                received_at,
                seq,
            },
        );
    }

    /// Pending inputs sorted by arrival time; equal timestamps keep submission order.
    pub fn ordered(&self) -> Vec<Input> {
        let mut inputs: Vec<Input> = self.pending.values().cloned().collect();
        inputs.sort_by_key(|input| (input.received_at, input.seq));
        inputs
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Drop whatever `player_id` queued this tick.
    pub fn remove(&mut self, player_id: PlayerId) {
        self.pending.remove(&player_id);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
