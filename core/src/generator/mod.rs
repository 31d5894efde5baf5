use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that decides where the mines of a game go.
///
/// `safe_zone` lists the tiles the first click guarantees to be mine-free. Implementations
/// return the linear indices of exactly `config.mines()` distinct tiles.
pub trait MinePlacer {
    fn place(&mut self, config: &GameConfig, safe_zone: &[TileIndex]) -> Result<Vec<TileIndex>>;
}
