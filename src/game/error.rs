use thiserror::Error;

use crate::game::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no free tile found after {attempts} attempts")]
    ArenaFull { attempts: usize },
    #[error("player {0} is not in the arena")]
    UnknownPlayer(PlayerId),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

pub type GameResult<T> = Result<T, GameError>;
