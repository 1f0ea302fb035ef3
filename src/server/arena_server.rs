//! Arena server actor.
//!
//! Drives the simulation on a fixed interval, relays disconnect notifications
//! to the affected sessions and broadcasts the resulting state to everyone.

use actix::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info};
use tokio::sync::mpsc::UnboundedReceiver;

use super::messages::ServerWsMessage;
use super::session::ArenaSession;
use crate::config::server::TICK_INTERVAL_MS;
use crate::game::arena::Arena;
use crate::game::state::{Disconnect, DisconnectReason};
use crate::game::types::PlayerId;

type SessionAddr = Addr<ArenaSession>;

pub struct ArenaServer {
    arena: Arc<Arena>,
    /// Live connections by the player id handed out on connect.
    sessions: HashMap<PlayerId, SessionAddr>,
    next_player_id: PlayerId,
    disconnects: UnboundedReceiver<Disconnect>,
}

impl ArenaServer {
    pub fn new(arena: Arc<Arena>, disconnects: UnboundedReceiver<Disconnect>) -> Self {
        Self {
            arena,
            sessions: HashMap::new(),
            next_player_id: 1,
            disconnects,
        }
    }

    /// Advance one tick, drop the connections of players that left the board
    /// and send everyone the new state.
    fn tick(&mut self) {
        self.arena.run_simulation();

        while let Ok(Disconnect { player_id, reason }) = self.disconnects.try_recv() {
            if let Some(addr) = self.sessions.remove(&player_id) {
                debug!("[ArenaServer] Closing session of player {} ({:?})", player_id, reason);
                addr.do_send(Kick { reason });
            }
        }

        let snapshot = self.arena.snapshot();
        for addr in self.sessions.values() {
            addr.do_send(ServerWsMessage::State(snapshot.clone()));
        }
    }
}

impl Actor for ArenaServer {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[ArenaServer] Ticking arena {} every {}ms", self.arena.id, TICK_INTERVAL_MS);
        ctx.run_interval(Duration::from_millis(TICK_INTERVAL_MS), |act, _ctx| {
            act.tick();
        });
    }
}

/// Message: a new WebSocket session wants a player id.
#[derive(Message)]
#[rtype(result = "PlayerId")]
pub struct Connect {
    pub addr: SessionAddr,
}

/// Message: a session closed.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Leave {
    pub player_id: PlayerId,
}

/// Message: the session must close because its player left the board.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Kick {
    pub reason: DisconnectReason,
}

impl Handler<Connect> for ArenaServer {
    type Result = MessageResult<Connect>;

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let player_id = self.next_player_id;
        self.next_player_id += 1;
        self.sessions.insert(player_id, msg.addr);
        debug!("[ArenaServer] Session connected as player {}", player_id);
        MessageResult(player_id)
    }
}

impl Handler<Leave> for ArenaServer {
    type Result = ();

    fn handle(&mut self, msg: Leave, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.player_id);
        self.arena.remove_player(msg.player_id);
        debug!("[ArenaServer] Player {} disconnected", msg.player_id);
    }
}
