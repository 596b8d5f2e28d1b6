//! Tic-tac-toe engine with a Zen Mode variant
//!
//! A small game engine and desktop front-end:
//! - Standard 3x3 board, three in a row wins
//! - Minimax opponent with a per-difficulty randomness knob
//! - Zen Mode: each side keeps at most three marks, the oldest fades out
//! - Local two-player mode without an engine
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Terminal-state evaluation and the Zen sliding window
//! - [`search`]: Exhaustive minimax with optional alpha-beta pruning
//! - [`engine`]: Move selection per difficulty (random, opening, minimax)
//! - [`session`]: Turn order, game lifecycle, undo and scoring
//! - [`config`]: Engine, session and front-end settings
//! - [`ui`]: eframe desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{AIEngine, Board, Difficulty, EngineConfig, Mark, Pos};
//!
//! let mut board = Board::new();
//! let mut engine = AIEngine::with_config(EngineConfig::default().with_seed(3));
//!
//! board.place(Pos::new(0, 0), Mark::X);
//!
//! // Engine answers as O
//! if let Some(pos) = engine.get_move(&board, Mark::O, Difficulty::Hard) {
//!     board.place(pos, Mark::O);
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! assert_eq!(board.mark_count(), 2);
//! ```
//!
//! # Move Priority
//!
//! 1. No empty cell, or two-player mode: no move
//! 2. Random empty cell, with the difficulty's probability
//! 3. Opening shortcut: center, else corner 0, on the first engine move
//! 4. Full minimax, lowest index on ties

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod search;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Mark, Pos, BOARD_SIZE, TOTAL_CELLS};
pub use config::{Difficulty, EngineConfig, SessionConfig, UiConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{ParseBoardError, SessionError};
pub use rules::{evaluate, MoveQueue, Outcome, WinLine};
pub use session::{
    GameReport, GameSession, OutcomeListener, Phase, Placement, PlayerResult, Scoreboard,
    TurnReport,
};
