use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::server::MAX_NAME_LEN;
use crate::game::input::Action;
use crate::game::snapshot::Snapshot;
use crate::game::state::DisconnectReason;
use crate::game::types::{Direction, PlayerId};

// Client -> server
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    Join { name: String, team: String },
    Move { direction: Direction },
    Bomb,
    Laser,
    Ping,
}

impl ClientWsMessage {
    /// Simulation input carried by this message, if any.
    pub fn into_action(self) -> Option<Action> {
        match self {
            ClientWsMessage::Join { name, team } => Some(join_action(&name, &team)),
            ClientWsMessage::Move { direction } => Some(Action::Move(direction)),
            ClientWsMessage::Bomb => Some(Action::Bomb),
            ClientWsMessage::Laser => Some(Action::Laser),
            ClientWsMessage::Ping => None,
        }
    }
}

/// Build a join with trimmed, length-capped name and team.
pub fn join_action(name: &str, team: &str) -> Action {
    let cap = |s: &str| s.trim().chars().take(MAX_NAME_LEN).collect::<String>();
    Action::Join {
        name: cap(name),
        team: cap(team),
    }
}

// Server -> client
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Welcome { player_id: PlayerId, arena_id: Uuid },
    State(Snapshot),
    Disconnected { reason: DisconnectReason },
}
