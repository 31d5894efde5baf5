use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Full grid as a view layer should draw it, for the initial paint or a resync.
///
/// Once the game has ended the mine disclosure is already applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub state: GameState,
    pub mines_left: isize,
    pub tiles: Array2<TileVisual>,
}

impl BoardSnapshot {
    pub fn new(board: &Board, state: GameState) -> Self {
        let config = board.config();
        let mut tiles = Array2::from_shape_fn(config.size().to_nd_index(), |(y, x)| {
            board.visual_at((x as Coord, y as Coord))
        });

        if state.is_final() {
            for (index, disclosure) in board.all_mine_tiles() {
                tiles[config.coords_of(index).to_nd_index()] = disclosure.into();
            }
        }

        Self {
            state,
            mines_left: board.mines_left(),
            tiles,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.tiles.dim();
        (width as Coord, height as Coord)
    }

    pub fn visual_at(&self, coords: Coord2) -> TileVisual {
        self.tiles[coords.to_nd_index()]
    }
}
