use alloc::vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Upper bound on rejection samples, per board tile, before falling back to a shuffle.
const SAMPLES_PER_TILE: usize = 4;

/// Uniform placement by rejection sampling over every tile of the board.
///
/// Samples hitting the safe zone or an already placed mine are retried. The number of
/// retries is bounded; once exhausted the remaining mines are drawn from a partial shuffle
/// of the tiles still free, so dense boards cannot stall placement.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R = SmallRng> {
    rng: R,
}

impl RandomPlacer<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinePlacer for RandomPlacer<R> {
    fn place(&mut self, config: &GameConfig, safe_zone: &[TileIndex]) -> Result<Vec<TileIndex>> {
        let total_tiles = usize::from(config.total_tiles());
        let wanted = usize::from(config.mines());

        let mut taken = vec![false; total_tiles];
        for &index in safe_zone {
            if let Some(tile) = taken.get_mut(index) {
                *tile = true;
            }
        }

        let mut mines = Vec::with_capacity(wanted);
        let max_samples = total_tiles.saturating_mul(SAMPLES_PER_TILE);
        let mut samples = 0;
        while mines.len() < wanted && samples < max_samples {
            samples += 1;
            let index = self.rng.random_range(0..total_tiles);
            if !taken[index] {
                taken[index] = true;
                mines.push(index);
            }
        }

        if mines.len() < wanted {
            let mut remaining: Vec<TileIndex> =
                (0..total_tiles).filter(|&index| !taken[index]).collect();
            let missing = (wanted - mines.len()).min(remaining.len());
            log::warn!(
                "Rejection sampling stalled after {} samples, shuffling {} free tiles for {} mines",
                samples,
                remaining.len(),
                missing
            );
            let (chosen, _) = remaining.partial_shuffle(&mut self.rng, missing);
            mines.extend_from_slice(chosen);
        }

        log::debug!("Placed {} mines in {} samples", mines.len(), samples);
        Ok(mines)
    }
}
