//! Search module for the tic-tac-toe engine
//!
//! Contains exhaustive minimax with depth-shaded terminal scores and
//! optional alpha-beta pruning.

pub mod minimax;

pub use minimax::{SearchResult, Searcher, WIN_SCORE};
