pub mod movement;
pub mod combat;
pub mod loot;
pub mod tick;

pub use movement::*;
pub use combat::*;
pub use loot::*;
pub use tick::*;
