//! Main entry point for the arena server.
//!
//! Loads the arena settings, starts the actor that ticks the simulation and
//! launches the HTTP server with the WebSocket endpoint players connect to.

use std::io;
use std::sync::Arc;

use actix::Actor;
use actix_web::{App, HttpServer, web};
use log::info;

use config::server::{BIND_ADDR, BIND_PORT};
use config::settings::Settings;
use game::arena::Arena;
use server::arena_server::ArenaServer;

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let settings = Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!("[Main] Arena settings: {:?}", settings);

    // The arena is shared by every session; the server actor owns the tick.
    let (arena, disconnects) = Arena::new(settings);
    let arena = Arc::new(arena);
    let arena_server = ArenaServer::new(arena.clone(), disconnects).start();

    let state = web::Data::new(server::state::AppState::new(arena, arena_server));

    info!("[Main] Listening on {}:{}", BIND_ADDR, BIND_PORT);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_ADDR, BIND_PORT))?
    .run()
    .await
}
