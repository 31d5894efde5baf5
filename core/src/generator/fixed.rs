use super::*;

/// Places mines at a predetermined set of coordinates, ignoring the safe zone.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, config: &GameConfig, _safe_zone: &[TileIndex]) -> Result<Vec<TileIndex>> {
        self.mines
            .iter()
            .map(|&coords| {
                config
                    .validate_coords(coords)
                    .map(|coords| config.index_of(coords))
            })
            .collect()
    }
}
