#![no_std]

extern crate alloc;

use alloc::string::ToString;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod board;
mod controller;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

/// Board dimensions and mine count, always valid once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 || mines >= mult(width, height) {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines,
            });
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    /// Parses and validates a JSON object with `width`, `height` and `mines`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawGameConfig = serde_json::from_str(json)
            .map_err(|err| GameError::InvalidConfigFormat(err.to_string()))?;
        Self::try_from(raw)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles() - self.mines
    }

    pub const fn contains(&self, (x, y): Coord2) -> bool {
        x < self.width && y < self.height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Converts signed input coordinates, `None` when they fall outside the board.
    pub fn checked_coords(&self, x: i32, y: i32) -> Option<Coord2> {
        let coords = (Coord::try_from(x).ok()?, Coord::try_from(y).ok()?);
        self.contains(coords).then_some(coords)
    }

    pub const fn index_of(&self, (x, y): Coord2) -> TileIndex {
        y as TileIndex * self.width as TileIndex + x as TileIndex
    }

    pub const fn coords_of(&self, index: TileIndex) -> Coord2 {
        let width = self.width as TileIndex;
        ((index % width) as Coord, (index / width) as Coord)
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(19, 13, 50)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing one or more tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Continue,
    Win,
    /// A mine was revealed at the given index.
    Loss(TileIndex),
}

impl RevealOutcome {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Win | Self::Loss(_))
    }
}

/// Used to merge outcomes when revealing several tiles at once.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Loss(index), _) => Loss(index),
            (_, Loss(index)) => Loss(index),
            (Win, _) => Win,
            (_, Win) => Win,
            (Continue, _) => Continue,
            (_, Continue) => Continue,
            (NoChange, NoChange) => NoChange,
        }
    }
}
