//! Main AI engine: difficulty handling on top of the minimax searcher
//!
//! The engine picks the automated opponent's move. Decisions are taken in
//! this order:
//!
//! 1. **No move**: a full board (or a two-player game) yields `None`
//! 2. **Random**: with the difficulty's probability, and at least two empty
//!    cells, any empty cell is picked uniformly
//! 3. **Opening**: on the engine's first move (9 or 8 empty cells) take the
//!    center, else corner 0, without searching
//! 4. **Minimax**: full search, lowest index wins ties
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Board, Difficulty, EngineConfig, Mark, Pos};
//!
//! // Randomness off so the result is reproducible
//! let mut engine = AIEngine::with_config(EngineConfig::optimal());
//! let board: Board = "XX..O....".parse().unwrap();
//!
//! let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
//! assert_eq!(result.best_move, Some(Pos::from_index(2)));
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Mark, Pos};
use crate::config::{Difficulty, EngineConfig};
use crate::search::{SearchResult, Searcher};

/// Corner taken when the center is already occupied on the first move
const OPENING_CORNER: usize = 0;

/// Which decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Uniformly random empty cell (difficulty knob)
    Random,
    /// First-move shortcut, no search
    Opening,
    /// Full minimax search
    Minimax,
    /// Nothing to play
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax value of the move for the engine's side (0 when not searched)
    pub score: i32,
    /// Decision that produced this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn random(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Random,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn opening(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Opening,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_minimax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: if result.best_move.is_some() {
                SearchType::Minimax
            } else {
                SearchType::NoMove
            },
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
        }
    }
}

/// Move picker for the automated opponent.
///
/// Holds the searcher, the difficulty knobs and its own RNG. The engine keeps
/// no game state between calls; any board can be passed at any time.
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
    rng: Pcg64,
}

impl AIEngine {
    /// Create an engine with default knobs and an entropy-seeded RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use tictactoe::AIEngine;
    ///
    /// let engine = AIEngine::new();
    /// assert!(!engine.config().alpha_beta);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    ///
    /// A configured `seed` makes every random decision reproducible.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        Self {
            searcher: Searcher::with_alpha_beta(config.alpha_beta),
            config,
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Restart the random sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = Pcg64::seed_from_u64(seed);
    }

    /// Get the move for `color` on `board`.
    ///
    /// Returns `None` when there is nothing to play: a full board, or a
    /// two-player game with no automated side.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Mark, difficulty: Difficulty) -> Option<Pos> {
        self.get_move_with_stats(board, color, difficulty).best_move
    }

    /// Get the move with detailed search statistics.
    ///
    /// `board` is only read; the search runs on a copy.
    #[must_use]
    pub fn get_move_with_stats(
        &mut self,
        board: &Board,
        color: Mark,
        difficulty: Difficulty,
    ) -> MoveResult {
        let start = Instant::now();
        let empties: Vec<Pos> = board.empty_cells().collect();

        // 0. Nothing to play
        if empties.is_empty() {
            warn!("move requested on a full board");
            return MoveResult::no_move(elapsed_ms(start));
        }
        if !difficulty.has_automated_opponent() {
            warn!(?difficulty, "move requested without an automated opponent");
            return MoveResult::no_move(elapsed_ms(start));
        }

        // 1. Difficulty knob: sometimes ignore the search entirely
        let p = self.config.randomness(difficulty);
        if empties.len() >= 2 && self.rng.gen::<f64>() < p {
            let pos = empties[self.rng.gen_range(0..empties.len())];
            debug!(?difficulty, p, %pos, "random move");
            return MoveResult::random(pos, elapsed_ms(start));
        }

        // 2. First engine move of the game
        if self.config.opening_shortcut {
            if let Some(pos) = Self::get_opening_move(board) {
                debug!(%pos, "opening move");
                return MoveResult::opening(pos, elapsed_ms(start));
            }
        }

        // 3. Full search
        let result = self.searcher.search(board, color);
        debug!(
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            "minimax move"
        );
        MoveResult::from_minimax(result, elapsed_ms(start))
    }

    /// Optimal move for `color` ignoring difficulty, randomness and the
    /// opening shortcut. Used for hints in two-player games.
    #[must_use]
    pub fn suggest(&mut self, board: &Board, color: Mark) -> MoveResult {
        let start = Instant::now();
        let result = self.searcher.search(board, color);
        MoveResult::from_minimax(result, elapsed_ms(start))
    }

    /// Center if free, else corner 0, while the board holds at most one mark.
    fn get_opening_move(board: &Board) -> Option<Pos> {
        if board.empty_count() < 8 {
            return None;
        }
        if board.is_empty(Pos::CENTER) {
            Some(Pos::CENTER)
        } else {
            Some(Pos::from_index(OPENING_CORNER))
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{check_winner, evaluate, Outcome};

    fn optimal_engine() -> AIEngine {
        AIEngine::with_config(EngineConfig::optimal().with_seed(1))
    }

    fn pos(idx: usize) -> Pos {
        Pos::from_index(idx)
    }

    #[test]
    fn test_engine_default_config() {
        let engine = AIEngine::default();
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn test_no_move_on_full_board() {
        let mut engine = optimal_engine();
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_local_two_player_never_searches() {
        let mut engine = optimal_engine();
        let board: Board = "XX..O....".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::LocalTwoPlayer);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_opening_takes_center() {
        let mut engine = optimal_engine();
        let result = engine.get_move_with_stats(&Board::new(), Mark::O, Difficulty::Hard);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert_eq!(result.search_type, SearchType::Opening);

        let board: Board = "X........".parse().unwrap();
        assert_eq!(engine.get_move(&board, Mark::O, Difficulty::Hard), Some(Pos::CENTER));
    }

    #[test]
    fn test_opening_falls_back_to_corner() {
        let mut engine = optimal_engine();
        let board: Board = "....X....".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
        assert_eq!(result.best_move, Some(pos(0)));
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_opening_shortcut_can_be_disabled() {
        let mut engine =
            AIEngine::with_config(EngineConfig::optimal().with_opening_shortcut(false));
        let board: Board = "....X....".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
        assert_eq!(result.search_type, SearchType::Minimax);
        // Every corner draws; the lowest index wins the tie
        assert_eq!(result.best_move, Some(pos(0)));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_forced_block() {
        let mut engine = optimal_engine();
        let board: Board = "XX..O....".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
        assert_eq!(result.best_move, Some(pos(2)));
        assert_eq!(result.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_full_randomness_always_random() {
        let config = EngineConfig::default().with_randomness(1.0, 1.0).with_seed(99);
        let mut engine = AIEngine::with_config(config);
        let board: Board = "XX..O....".parse().unwrap();

        for _ in 0..50 {
            let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Relaxed);
            assert_eq!(result.search_type, SearchType::Random);
            let mov = result.best_move.unwrap();
            assert!(board.is_empty(mov));
        }
    }

    #[test]
    fn test_zero_randomness_never_random() {
        let mut engine = optimal_engine();
        let board: Board = "X...O....".parse().unwrap();
        for _ in 0..50 {
            let result = engine.get_move_with_stats(&board, Mark::O, Difficulty::Relaxed);
            assert_ne!(result.search_type, SearchType::Random);
        }
    }

    #[test]
    fn test_last_cell_is_never_randomized() {
        let config = EngineConfig::default().with_randomness(1.0, 1.0).with_seed(3);
        let mut engine = AIEngine::with_config(config);
        let board: Board = "XOXXOOOX.".parse().unwrap();
        let result = engine.get_move_with_stats(&board, Mark::X, Difficulty::Relaxed);
        assert_eq!(result.best_move, Some(pos(8)));
        assert_eq!(result.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_zen_uses_relaxed_knob() {
        let config = EngineConfig::default().with_randomness(1.0, 0.0).with_seed(5);
        let mut engine = AIEngine::with_config(config);
        let board: Board = "XX..O....".parse().unwrap();

        let zen = engine.get_move_with_stats(&board, Mark::O, Difficulty::Zen);
        assert_eq!(zen.search_type, SearchType::Random);

        let hard = engine.get_move_with_stats(&board, Mark::O, Difficulty::Hard);
        assert_eq!(hard.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let config = EngineConfig::default().with_seed(1234);
        let mut a = AIEngine::with_config(config.clone());
        let mut b = AIEngine::with_config(config);
        let board: Board = "X...O...X".parse().unwrap();

        for _ in 0..20 {
            assert_eq!(
                a.get_move(&board, Mark::O, Difficulty::Relaxed),
                b.get_move(&board, Mark::O, Difficulty::Relaxed)
            );
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let config = EngineConfig::default().with_randomness(1.0, 1.0);
        let mut engine = AIEngine::with_config(config.clone().with_seed(99));
        let board = Board::new();

        let first: Vec<_> = (0..10)
            .map(|_| engine.get_move(&board, Mark::O, Difficulty::Relaxed))
            .collect();
        engine.reseed(99);
        let replay: Vec<_> = (0..10)
            .map(|_| engine.get_move(&board, Mark::O, Difficulty::Relaxed))
            .collect();

        assert_eq!(first, replay);
        assert_eq!(engine.config().seed, Some(99));
    }

    #[test]
    fn test_move_is_always_legal() {
        let mut engine = AIEngine::with_config(EngineConfig::default().with_seed(7));
        let mut rng = Pcg64::seed_from_u64(11);

        for _ in 0..200 {
            // Random non-terminal position
            let mut board = Board::new();
            let mut to_move = Mark::X;
            let plies = rng.gen_range(0..8);
            for _ in 0..plies {
                if evaluate(&board, true) != Outcome::Ongoing {
                    break;
                }
                let empties: Vec<Pos> = board.empty_cells().collect();
                board.place(empties[rng.gen_range(0..empties.len())], to_move);
                to_move = to_move.opponent();
            }
            if evaluate(&board, true) != Outcome::Ongoing {
                continue;
            }

            let before = board;
            for difficulty in [Difficulty::Relaxed, Difficulty::Hard, Difficulty::Zen] {
                let mov = engine.get_move(&board, to_move, difficulty);
                let mov = mov.expect("non-full board must yield a move");
                assert!(board.is_empty(mov));
            }
            assert_eq!(board, before);
        }
    }

    /// Walks every human reply; the engine must never end up beaten.
    fn assert_never_loses(engine: &mut AIEngine, board: &mut Board, to_move: Mark, engine_mark: Mark) {
        if let Some(win) = check_winner(board) {
            assert_eq!(win.mark, engine_mark, "engine lost on\n{board}");
            return;
        }
        if board.empty_count() == 0 {
            return;
        }

        if to_move == engine_mark {
            let mov = engine
                .get_move(board, engine_mark, Difficulty::Hard)
                .expect("engine must move");
            board.place(mov, engine_mark);
            assert_never_loses(engine, board, to_move.opponent(), engine_mark);
            board.remove(mov);
        } else {
            let empties: Vec<Pos> = board.empty_cells().collect();
            for mov in empties {
                board.place(mov, to_move);
                assert_never_loses(engine, board, to_move.opponent(), engine_mark);
                board.remove(mov);
            }
        }
    }

    #[test]
    fn test_optimal_engine_never_loses_moving_first() {
        let mut engine = optimal_engine();
        assert_never_loses(&mut engine, &mut Board::new(), Mark::O, Mark::O);
    }

    #[test]
    fn test_optimal_engine_never_loses_moving_second() {
        let mut engine = optimal_engine();
        assert_never_loses(&mut engine, &mut Board::new(), Mark::X, Mark::O);
    }

    #[test]
    fn test_alpha_beta_engine_never_loses() {
        let mut engine = AIEngine::with_config(EngineConfig::optimal().with_alpha_beta(true));
        assert_never_loses(&mut engine, &mut Board::new(), Mark::X, Mark::O);
    }

    #[test]
    fn test_suggest_ignores_difficulty() {
        let mut engine = AIEngine::with_config(EngineConfig::default().with_randomness(1.0, 1.0));
        let board: Board = "OO.XX....".parse().unwrap();
        let result = engine.suggest(&board, Mark::X);
        assert_eq!(result.best_move, Some(pos(5)));
        assert_eq!(result.search_type, SearchType::Minimax);
    }
}
