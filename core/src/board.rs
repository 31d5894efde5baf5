use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::mem;
use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Tiles the first click guarantees to be mine-free: the clicked tile first, then its
/// neighbors.
pub type SafeZone = SmallVec<[TileIndex; 9]>;

/// Grid of tiles with the mine layout and per-tile player state.
///
/// Query methods taking a [`Coord2`] index the grid directly and panic when the coordinates
/// are out of bounds. Mutating methods validate them and return [`GameError::InvalidCoords`].
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    mines: Array2<bool>,
    tiles: Array2<TileState>,
    mines_placed: bool,
    safe_revealed: CellCount,
    flagged: CellCount,
    exploded: Option<TileIndex>,
    changes: Vec<TileIndex>,
}

impl Board {
    pub fn initialize(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Ok(Self::new(GameConfig::new(width, height, mines)?))
    }

    pub fn new(config: GameConfig) -> Self {
        let shape = config.size().to_nd_index();
        Self {
            config,
            mines: Array2::default(shape),
            tiles: Array2::default(shape),
            mines_placed: false,
            safe_revealed: 0,
            flagged: 0,
            exploded: None,
            changes: Vec::new(),
        }
    }

    /// Board with mines already placed at `mines`, regardless of any safe zone.
    pub fn with_mines(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(config);
        let layout = FixedPlacer::new(mines).place(&config, &[])?;
        let count = board.lay_mines(layout)?;
        log::debug!("Placed {} mines from a fixed layout", count);
        Ok(board)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn has_mines(&self) -> bool {
        self.mines_placed
    }

    pub fn safe_revealed_count(&self) -> CellCount {
        self.safe_revealed
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged
    }

    /// Mines not yet accounted for by a flag, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged as isize)
    }

    /// Index of the revealed mine that ended the game, if any.
    pub fn exploded(&self) -> Option<TileIndex> {
        self.exploded
    }

    /// Whether every safe tile has been discovered.
    pub fn is_cleared(&self) -> bool {
        self.safe_revealed == self.config.safe_tiles()
    }

    pub fn tile_at(&self, coords: Coord2) -> TileState {
        self.tiles[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.mines[coords.to_nd_index()]
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        self.config.neighbors_of(coords)
    }

    pub fn mines_around(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |board, pos| board.is_mine(pos))
    }

    pub fn flags_around(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |board, pos| {
            board.tile_at(pos) == TileState::Flagged
        })
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Self, Coord2) -> bool) -> u8 {
        let mut count = 0;
        for pos in self.neighbors_of(coords) {
            if pred(self, pos) {
                count += 1;
            }
        }
        count
    }

    pub fn visual_at(&self, coords: Coord2) -> TileVisual {
        match self.tile_at(coords) {
            TileState::Empty => TileVisual::Empty,
            TileState::Flagged => TileVisual::Flagged,
            TileState::Discovered if self.exploded == Some(self.config.index_of(coords)) => {
                TileVisual::ExplodedMine
            }
            TileState::Discovered => TileVisual::Discovered(self.mines_around(coords)),
        }
    }

    /// Clicked tile plus its neighbors, shrunk to only the clicked tile when the board is too
    /// dense to keep all of them free.
    pub fn safe_zone(&self, coords: Coord2) -> SafeZone {
        let mut zone = SafeZone::new();
        zone.push(self.config.index_of(coords));
        zone.extend(
            self.neighbors_of(coords)
                .map(|pos| self.config.index_of(pos)),
        );

        let free_tiles = usize::from(self.config.total_tiles()) - zone.len();
        if usize::from(self.config.mines()) > free_tiles {
            log::warn!(
                "Cannot keep neighbors of {:?} free of mines, fallback to clicked tile only",
                coords
            );
            zone.truncate(1);
        }
        zone
    }

    /// Lays out the mines for this game, keeping the safe zone around `safe` free.
    pub fn place_mines<P>(&mut self, safe: Coord2, placer: &mut P) -> Result<()>
    where
        P: MinePlacer + ?Sized,
    {
        let safe = self.config.validate_coords(safe)?;
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let zone = self.safe_zone(safe);
        let layout = placer.place(&self.config, &zone)?;
        let count = self.lay_mines(layout)?;
        log::debug!("Placed {} mines, first click at {:?}", count, safe);
        Ok(())
    }

    fn lay_mines(&mut self, layout: Vec<TileIndex>) -> Result<CellCount> {
        let mut mines: Array2<bool> = Array2::default(self.config.size().to_nd_index());
        let mut count: CellCount = 0;
        for index in layout {
            if index >= usize::from(self.config.total_tiles()) {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut mines[self.config.coords_of(index).to_nd_index()];
            if !*cell {
                *cell = true;
                count += 1;
            }
        }

        if count != self.config.mines() {
            return Err(GameError::MineCountMismatch {
                expected: self.config.mines(),
                actual: count,
            });
        }

        self.mines = mines;
        self.mines_placed = true;
        Ok(count)
    }

    /// Reveals a tile, flood-filling through tiles with no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.tile_at(coords) != TileState::Empty {
            return Ok(RevealOutcome::NoChange);
        }

        if self.is_mine(coords) {
            let index = self.config.index_of(coords);
            self.tiles[coords.to_nd_index()] = TileState::Discovered;
            self.exploded = Some(index);
            self.changes.push(index);
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::Loss(index));
        }

        self.flood_reveal(coords);

        Ok(if self.is_cleared() {
            RevealOutcome::Win
        } else {
            RevealOutcome::Continue
        })
    }

    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            // queued more than once by different zero tiles
            if self.tile_at(coords) != TileState::Empty {
                continue;
            }
            debug_assert!(!self.is_mine(coords));

            let count = self.mines_around(coords);
            self.tiles[coords.to_nd_index()] = TileState::Discovered;
            self.safe_revealed += 1;
            self.changes.push(self.config.index_of(coords));
            log::trace!("Opened tile at {:?}, mine count: {}", coords, count);

            if count == 0 {
                to_visit.extend(
                    self.neighbors_of(coords)
                        .filter(|&pos| self.tile_at(pos) == TileState::Empty),
                );
            }
        }
    }

    /// Reveals all neighbors of a discovered tile once its flag count matches its mine count.
    pub fn chord_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.tile_at(coords) != TileState::Discovered || self.is_mine(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.flags_around(coords) != self.mines_around(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in self.neighbors_of(coords) {
            outcome = outcome | self.reveal(neighbor)?;
            if matches!(outcome, RevealOutcome::Loss(_)) {
                break;
            }
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;

        let tile = &mut self.tiles[coords.to_nd_index()];
        let outcome = match *tile {
            TileState::Empty => {
                *tile = TileState::Flagged;
                self.flagged += 1;
                MarkOutcome::Changed
            }
            TileState::Flagged => {
                *tile = TileState::Empty;
                self.flagged -= 1;
                MarkOutcome::Changed
            }
            TileState::Discovered => MarkOutcome::NoChange,
        };

        if outcome.has_update() {
            self.changes.push(self.config.index_of(coords));
        }
        Ok(outcome)
    }

    /// Back to a fresh, unmined board of the same size.
    pub fn reset(&mut self) {
        self.changes.clear();
        for (index, (tile, mine)) in self.tiles.iter().zip(self.mines.iter()).enumerate() {
            if *tile != TileState::Empty || *mine {
                self.changes.push(index);
            }
        }

        self.tiles.fill(TileState::Empty);
        self.mines.fill(false);
        self.mines_placed = false;
        self.safe_revealed = 0;
        self.flagged = 0;
        self.exploded = None;
        log::debug!("Board reset, {} tiles to redraw", self.changes.len());
    }

    /// Every mine and every flagged tile, classified for the end-of-game display.
    pub fn all_mine_tiles(&self) -> Vec<(TileIndex, Disclosure)> {
        self.tiles
            .iter()
            .zip(self.mines.iter())
            .enumerate()
            .filter_map(|(index, (&tile, &mine))| {
                let flagged = tile == TileState::Flagged;
                let disclosure = if self.exploded == Some(index) {
                    Disclosure::Exploded
                } else if mine && flagged {
                    Disclosure::FlaggedMine
                } else if flagged {
                    Disclosure::BadFlag
                } else if mine {
                    Disclosure::Mine
                } else {
                    return None;
                };
                Some((index, disclosure))
            })
            .collect()
    }

    /// Drains the indices of tiles whose state changed since the last call.
    pub fn take_changes(&mut self) -> Vec<TileIndex> {
        mem::take(&mut self.changes)
    }
}
