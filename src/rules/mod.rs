//! Game rules for tic-tac-toe and its Zen variant
//!
//! This module implements the rule set:
//! - Win and draw detection over the eight fixed lines
//! - The Zen Mode sliding window (three marks per side)

pub mod win;
pub mod window;

// Re-exports for convenient access
pub use win::{
    check_winner, completes_line, evaluate, has_line, is_full, Outcome, WinLine, WINNING_LINES,
};
pub use window::{apply_placement, MoveQueue, WINDOW_SIZE};
