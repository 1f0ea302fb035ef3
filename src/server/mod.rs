// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the host around the simulation, including:
//! - Application state shared with HTTP/WebSocket handlers
//! - HTTP/WebSocket routing
//! - The arena server actor (tick driver, broadcast, disconnect relay)
//! - Per-connection WebSocket sessions

pub mod state;
pub mod router;
pub mod messages;
pub mod arena_server;
pub mod session;
pub mod ws_error;
