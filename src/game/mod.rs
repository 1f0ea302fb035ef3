//! Authoritative arena simulation.
//!
//! [`arena::Arena`] is the only way in from outside: everything else operates on
//! a `&mut GameState` the arena lends out under its lock.

pub mod types;
pub mod error;
pub mod utils;
pub mod state;
pub mod input;
pub mod events;
pub mod bestlist;
pub mod snapshot;
pub mod arena;
#[cfg(test)]
mod tests;

pub mod entities;
pub mod grid;
pub mod systems;
