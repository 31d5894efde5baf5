use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {width}x{height} board with {mines} mines")]
    InvalidConfiguration {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Could not parse configuration: {0}")]
    InvalidConfigFormat(String),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mines were already placed for this game")]
    MinesAlreadyPlaced,
    #[error("Mine layout has {actual} mines, expected {expected}")]
    MineCountMismatch {
        expected: CellCount,
        actual: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
