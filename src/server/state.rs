// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the shared arena and the address of the actor driving it.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use std::sync::Arc;

use actix::Addr;

use crate::game::arena::Arena;
use crate::server::arena_server::ArenaServer;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// The simulation; sessions submit inputs to it directly.
    pub arena: Arc<Arena>,
    /// Address of the actor ticking the arena and tracking sessions.
    pub arena_server: Addr<ArenaServer>,
}

impl AppState {
    pub fn new(arena: Arc<Arena>, arena_server: Addr<ArenaServer>) -> Self {
        AppState {
            arena,
            arena_server,
        }
    }
}
