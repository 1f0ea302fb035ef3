//! Game entities module.
//!
//! Spawn and removal of every entity kind. Each function updates the kind's
//! registry and grid together.

pub mod player;
pub mod airstrike;
pub mod bomb;
pub mod explosion;
pub mod corpse;
pub mod loot;

pub use player::*;
pub use airstrike::*;
pub use bomb::*;
pub use explosion::*;
pub use corpse::*;
pub use loot::*;
