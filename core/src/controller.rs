use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Waiting -> Started
/// - Started -> GameOver
/// - Started -> Win
/// - GameOver -> Waiting
/// - Win -> Waiting
///
/// The first click goes through `Started`, so `Waiting -> Win` can happen within a single
/// input on a board cleared by one flood fill.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No mines placed yet, waiting for the first reveal
    #[default]
    Waiting,
    /// Game in progress
    Started,
    /// A mine was revealed
    GameOver,
    /// Every safe tile was revealed
    Win,
}

impl GameState {
    /// Indicates the game has ended and the next click starts over
    pub const fn is_final(self) -> bool {
        matches!(self, Self::GameOver | Self::Win)
    }
}

/// A tile the view layer has to redraw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChange {
    pub x: Coord,
    pub y: Coord,
    pub visual: TileVisual,
}

/// Drives a [`Board`] from player input and reports what to redraw.
#[derive(Clone, Debug)]
pub struct GameController<P = RandomPlacer> {
    board: Board,
    placer: P,
    state: GameState,
}

impl GameController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_placer(config, RandomPlacer::from_seed(seed))
    }
}

impl<P: MinePlacer> GameController<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Self {
        Self {
            board: Board::new(config),
            placer,
            state: GameState::default(),
        }
    }

    pub fn current_state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(&self.board, self.state)
    }

    /// Reveal intent: starts the game, reveals a tile, chords a discovered tile, or resets a
    /// finished game.
    pub fn on_primary_input(&mut self, x: i32, y: i32) -> Vec<TileChange> {
        let Some(coords) = self.config().checked_coords(x, y) else {
            log::debug!("Ignoring primary input outside the board at ({}, {})", x, y);
            return Vec::new();
        };

        let outcome = match self.state {
            GameState::GameOver | GameState::Win => return self.restart(),
            GameState::Waiting => self.start(coords),
            GameState::Started if self.board.tile_at(coords) == TileState::Discovered => {
                self.board.chord_reveal(coords)
            }
            GameState::Started => self.board.reveal(coords),
        };

        match outcome {
            Ok(outcome) => self.finish_move(outcome),
            Err(err) => {
                log::error!("Primary input at {:?} failed: {}", coords, err);
                self.collect_changes()
            }
        }
    }

    /// Flag intent: toggles a flag while the game runs, resets a finished game.
    pub fn on_secondary_input(&mut self, x: i32, y: i32) -> Vec<TileChange> {
        let Some(coords) = self.config().checked_coords(x, y) else {
            log::debug!("Ignoring secondary input outside the board at ({}, {})", x, y);
            return Vec::new();
        };

        match self.state {
            GameState::GameOver | GameState::Win => self.restart(),
            GameState::Waiting => Vec::new(),
            GameState::Started => match self.board.toggle_flag(coords) {
                Ok(_) => self.collect_changes(),
                Err(err) => {
                    log::error!("Secondary input at {:?} failed: {}", coords, err);
                    Vec::new()
                }
            },
        }
    }

    fn start(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.board.place_mines(coords, &mut self.placer)?;
        self.state = GameState::Started;
        log::debug!("Game started at {:?}", coords);
        self.board.reveal(coords)
    }

    fn finish_move(&mut self, outcome: RevealOutcome) -> Vec<TileChange> {
        if !outcome.is_final() {
            return self.collect_changes();
        }

        let next = match outcome {
            RevealOutcome::Loss(_) => GameState::GameOver,
            _ => GameState::Win,
        };

        self.state = next;
        log::debug!("Game ended with {:?}", next);

        let disclosed = self.board.all_mine_tiles();
        let mut indices = self.board.take_changes();
        indices.retain(|index| {
            disclosed
                .binary_search_by_key(index, |&(i, _)| i)
                .is_err()
        });

        let mut changes: Vec<_> = indices
            .into_iter()
            .map(|index| self.change_at(index))
            .collect();
        changes.extend(
            disclosed
                .into_iter()
                .map(|(index, disclosure)| self.change_with(index, disclosure.into())),
        );
        changes
    }

    fn restart(&mut self) -> Vec<TileChange> {
        self.board.reset();
        self.state = GameState::Waiting;
        log::debug!("Game reset");
        self.collect_changes()
    }

    fn collect_changes(&mut self) -> Vec<TileChange> {
        self.board
            .take_changes()
            .into_iter()
            .map(|index| self.change_at(index))
            .collect()
    }

    fn change_at(&self, index: TileIndex) -> TileChange {
        let (x, y) = self.config().coords_of(index);
        let visual = self.board.visual_at((x, y));
        TileChange { x, y, visual }
    }

    fn change_with(&self, index: TileIndex, visual: TileVisual) -> TileChange {
        let (x, y) = self.config().coords_of(index);
        TileChange { x, y, visual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> GameController<FixedPlacer> {
        let config = GameConfig::new(size.0, size.1, mines.len() as CellCount).unwrap();
        GameController::with_placer(config, FixedPlacer::new(mines))
    }

    fn change(x: Coord, y: Coord, visual: TileVisual) -> TileChange {
        TileChange { x, y, visual }
    }

    #[test]
    fn first_click_flood_fill_can_win_immediately() {
        let mut game = game((5, 5), &[(4, 4)]);

        let changes = game.on_primary_input(0, 0);

        assert_eq!(game.current_state(), GameState::Win);
        assert_eq!(game.board().safe_revealed_count(), 24);
        // 24 discovered tiles and the disclosed mine
        assert_eq!(changes.len(), 25);
        assert!(changes.contains(&change(4, 4, TileVisual::Mine)));
        assert!(changes.contains(&change(3, 3, TileVisual::Discovered(1))));
    }

    #[test]
    fn first_click_next_to_mine_stays_started() {
        let mut game = game((3, 3), &[(1, 1)]);

        let changes = game.on_primary_input(0, 0);

        assert_eq!(game.current_state(), GameState::Started);
        assert_eq!(changes, [change(0, 0, TileVisual::Discovered(1))]);
        assert_eq!(game.board().mines_around((0, 0)), 1);
    }

    #[test]
    fn revealing_mine_is_game_over() {
        let mut game = game((3, 3), &[(0, 0), (2, 2)]);
        game.on_primary_input(1, 0);

        let changes = game.on_primary_input(2, 2);

        assert_eq!(game.current_state(), GameState::GameOver);
        assert_eq!(
            changes,
            [
                change(0, 0, TileVisual::Mine),
                change(2, 2, TileVisual::ExplodedMine)
            ]
        );
        assert_eq!(
            game.board().all_mine_tiles(),
            [(0, Disclosure::Mine), (8, Disclosure::Exploded)]
        );
    }

    #[test]
    fn secondary_input_toggles_flags_only_while_started() {
        let mut game = game((3, 3), &[(2, 2)]);

        assert!(game.on_secondary_input(0, 0).is_empty());
        assert_eq!(game.current_state(), GameState::Waiting);

        game.on_primary_input(1, 1);
        assert_eq!(
            game.on_secondary_input(2, 2),
            [change(2, 2, TileVisual::Flagged)]
        );
        assert_eq!(game.mines_left(), 0);
        assert_eq!(
            game.on_secondary_input(2, 2),
            [change(2, 2, TileVisual::Empty)]
        );
        assert!(game.on_secondary_input(1, 1).is_empty());
        assert_eq!(game.current_state(), GameState::Started);
    }

    #[test]
    fn flagged_tile_ignores_primary_input() {
        let mut game = game((3, 3), &[(2, 2)]);
        game.on_primary_input(1, 1);
        game.on_secondary_input(0, 0);

        assert!(game.on_primary_input(0, 0).is_empty());
        assert_eq!(game.board().tile_at((0, 0)), TileState::Flagged);
        assert_eq!(game.current_state(), GameState::Started);
    }

    #[test]
    fn primary_input_on_discovered_tile_chords() {
        let mut game = game((3, 3), &[(0, 1), (2, 1)]);
        game.on_primary_input(1, 1);
        game.on_secondary_input(0, 1);

        assert!(game.on_primary_input(1, 1).is_empty());
        assert_eq!(game.current_state(), GameState::Started);

        game.on_secondary_input(2, 1);
        let changes = game.on_primary_input(1, 1);

        assert_eq!(game.current_state(), GameState::Win);
        assert!(changes.contains(&change(1, 0, TileVisual::Discovered(2))));
        assert!(changes.contains(&change(0, 1, TileVisual::FlaggedMine)));
        assert!(changes.contains(&change(2, 1, TileVisual::FlaggedMine)));
        assert_eq!(changes.len(), 8);
    }

    #[test]
    fn repeated_reveal_changes_nothing() {
        let mut game = game((3, 3), &[(1, 1)]);
        game.on_primary_input(0, 0);

        assert!(game.on_primary_input(0, 0).is_empty());
        assert_eq!(game.current_state(), GameState::Started);
    }

    #[test]
    fn any_click_after_end_resets() {
        let mut game = game((3, 3), &[(2, 2)]);
        game.on_primary_input(1, 1);
        game.on_primary_input(2, 2);
        assert_eq!(game.current_state(), GameState::GameOver);

        let changes = game.on_secondary_input(1, 1);

        assert_eq!(game.current_state(), GameState::Waiting);
        assert!(changes.iter().all(|change| change.visual == TileVisual::Empty));
        assert!(changes.contains(&change(2, 2, TileVisual::Empty)));
        assert!(!game.board().has_mines());

        game.on_primary_input(1, 1);
        assert_eq!(game.current_state(), GameState::Started);
    }

    #[test]
    fn win_only_accepts_reset() {
        let mut game = game((2, 1), &[(1, 0)]);

        game.on_primary_input(0, 0);
        assert_eq!(game.current_state(), GameState::Win);

        let changes = game.on_primary_input(0, 0);
        assert_eq!(game.current_state(), GameState::Waiting);
        assert_eq!(
            changes,
            [change(0, 0, TileVisual::Empty), change(1, 0, TileVisual::Empty)]
        );
    }

    #[test]
    fn out_of_bounds_input_is_ignored() {
        let mut game = game((3, 3), &[(2, 2)]);

        assert!(game.on_primary_input(-1, 0).is_empty());
        assert!(game.on_primary_input(3, 0).is_empty());
        assert!(game.on_secondary_input(0, 99).is_empty());
        assert_eq!(game.current_state(), GameState::Waiting);
        assert!(!game.board().has_mines());
    }

    #[test]
    fn bad_layout_keeps_waiting() {
        let config = GameConfig::new(3, 3, 2).unwrap();
        let mut game = GameController::with_placer(config, FixedPlacer::new([(0, 0)]));

        assert!(game.on_primary_input(1, 1).is_empty());
        assert_eq!(game.current_state(), GameState::Waiting);
    }

    #[test]
    fn seeded_games_are_reproducible_and_start_safely() {
        let config = GameConfig::default();

        for seed in 0..20 {
            let mut first = GameController::new(config, seed);
            let mut second = GameController::new(config, seed);

            let changes = first.on_primary_input(9, 6);
            assert_eq!(changes, second.on_primary_input(9, 6));
            assert_eq!(first.current_state(), GameState::Started);
            assert!(changes.contains(&change(9, 6, TileVisual::Discovered(0))));
            assert_eq!(first.board().all_mine_tiles().len(), 50);
        }
    }

    #[test]
    fn full_game_reaches_win_by_revealing_every_safe_tile() {
        let config = GameConfig::beginner();
        let mut game = GameController::new(config, 42);
        game.on_primary_input(4, 4);

        for index in 0..usize::from(config.total_tiles()) {
            let (x, y) = config.coords_of(index);
            if !game.board().is_mine((x, y)) {
                game.on_primary_input(x.into(), y.into());
            }
            if game.current_state().is_final() {
                break;
            }
        }

        assert_eq!(game.current_state(), GameState::Win);
        assert_eq!(
            game.board().safe_revealed_count(),
            config.total_tiles() - config.mines()
        );
    }
}
