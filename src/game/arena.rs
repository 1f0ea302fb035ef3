//! Thread-safe entry points into the simulation.
//!
//! One `Arena` owns the world behind a single mutex. Input submission, tick
//! advance, player removal and snapshots all take that lock for their whole
//! duration, so no entity reference ever escapes it.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::game::entities::sink_ship;
use crate::game::input::Action;
use crate::game::snapshot::Snapshot;
use crate::game::state::{Disconnect, GameState};
use crate::game::systems::run_tick;
use crate::game::types::PlayerId;

pub struct Arena {
    pub id: Uuid,
    state: Mutex<GameState>,
}

impl Arena {
    /// New arena seeded from the OS. Returns the receiving end of the
    /// disconnect notifications the host must relay.
    pub fn new(settings: Settings) -> (Self, UnboundedReceiver<Disconnect>) {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// New arena drawing every random placement from `rng`.
    pub fn with_rng(settings: Settings, rng: StdRng) -> (Self, UnboundedReceiver<Disconnect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let arena = Arena {
            id: Uuid::new_v4(),
            state: Mutex::new(GameState::new(settings, rng, tx)),
        };
        info!("[Arena] Created arena {}", arena.id);
        (arena, rx)
    }

    /// Queue `action` for the next tick, replacing any earlier action of this player.
    pub fn store_input(&self, player_id: PlayerId, action: Action) {
        self.store_input_at(player_id, action, Instant::now());
    }

    pub fn store_input_at(&self, player_id: PlayerId, action: Action, received_at: Instant) {
        self.lock().inputs.store(player_id, action, received_at);
    }

    /// Advance the world by one tick.
    pub fn run_simulation(&self) {
        run_tick(&mut self.lock());
    }

    /// Take a player off the board after its connection dropped, along with
    /// anything it queued for the next tick. No-op if it is already gone.
    pub fn remove_player(&self, player_id: PlayerId) {
        let mut state = self.lock();
        state.inputs.remove(player_id);
        if let Some(player) = sink_ship(&mut state, player_id) {
            info!("[Arena] {} (player {}) left the arena", player.name, player_id);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&*self.lock())
    }

    /// Run `f` against the world under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("[Arena] Recovering world lock poisoned by a panicked holder");
            poisoned.into_inner()
        })
    }
}
