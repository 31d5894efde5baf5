use serde::{Deserialize, Serialize};

/// Player-visible state stored per tile by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Empty,
    Discovered,
    Flagged,
}

/// What a view layer should draw for a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileVisual {
    #[default]
    Empty,
    Discovered(u8),
    Flagged,
    // these are only used to show result after the game finishes:
    ExplodedMine,
    Mine,
    FlaggedMine,
    BadFlag,
}

/// End-of-game classification of a mine or flagged tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disclosure {
    /// The mine that was revealed and ended the game.
    Exploded,
    FlaggedMine,
    /// A flag placed on a tile without a mine.
    BadFlag,
    Mine,
}

impl Disclosure {
    pub const fn is_exploded(self) -> bool {
        matches!(self, Self::Exploded)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::FlaggedMine | Self::BadFlag)
    }
}

impl From<Disclosure> for TileVisual {
    fn from(other: Disclosure) -> Self {
        match other {
            Disclosure::Exploded => TileVisual::ExplodedMine,
            Disclosure::FlaggedMine => TileVisual::FlaggedMine,
            Disclosure::BadFlag => TileVisual::BadFlag,
            Disclosure::Mine => TileVisual::Mine,
        }
    }
}
