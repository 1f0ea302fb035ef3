//! Main configuration module.
//!
//! Re-exports submodules for game, server and per-arena settings.

pub mod game;
pub mod server;
pub mod settings;
