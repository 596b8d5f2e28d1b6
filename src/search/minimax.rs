//! Exhaustive minimax over the remaining game tree
//!
//! The side to move at the root maximizes. Terminal positions score
//! `WIN_SCORE - depth` for a root-side win and `depth - WIN_SCORE` for a
//! loss, where `depth` counts plies below the root move, so faster wins and
//! slower losses are preferred. A full board without a line scores 0.
//!
//! The tree has at most 9! leaves, so no depth limit or move ordering is
//! needed. Alpha-beta pruning is optional and never changes the chosen move:
//! the root keeps the first strictly greatest value in ascending index order.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Mark, Pos};
//! use tictactoe::search::Searcher;
//!
//! let board: Board = "XX..O....".parse().unwrap();
//! let result = Searcher::new().search(&board, Mark::O);
//! assert_eq!(result.best_move, Some(Pos::from_index(2)));
//! ```

use crate::board::{Board, Mark, Pos};
use crate::rules::{check_winner, is_full};

/// Base terminal score
pub const WIN_SCORE: i32 = 10;

/// Bound wider than any reachable score
const INF: i32 = WIN_SCORE + 100;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Minimax value of the best move from the searching side's view
    pub score: i32,
    /// Positions visited
    pub nodes: u64,
}

/// Minimax searcher.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    alpha_beta: bool,
    nodes: u64,
}

impl Searcher {
    /// Plain minimax, no pruning
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alpha_beta(alpha_beta: bool) -> Self {
        Self {
            alpha_beta,
            nodes: 0,
        }
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Find the best move for `color`.
    ///
    /// Works on a copy; the caller's board is never modified.
    pub fn search(&mut self, board: &Board, color: Mark) -> SearchResult {
        self.nodes = 0;
        let mut work_board = *board;

        let mut best_move = None;
        let mut best_score = -INF;

        for mov in board.empty_cells() {
            work_board.place(mov, color);
            // Ties keep the earlier move, so a child that can only match
            // best_score may be cut off at that bound.
            let score = self.minimax(&mut work_board, color, 0, false, best_score, INF);
            work_board.remove(mov);

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            nodes: self.nodes,
        }
    }

    /// Value of every empty cell for `color`, ascending index order.
    /// Always searched without pruning so each value is exact.
    pub fn score_moves(&mut self, board: &Board, color: Mark) -> Vec<(Pos, i32)> {
        self.nodes = 0;
        let mut work_board = *board;

        board
            .empty_cells()
            .map(|mov| {
                work_board.place(mov, color);
                let score = self.minimax_exact(&mut work_board, color, 0, false);
                work_board.remove(mov);
                (mov, score)
            })
            .collect()
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        color: Mark,
        depth: i32,
        maximizing: bool,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        if !self.alpha_beta {
            return self.minimax_exact(board, color, depth, maximizing);
        }
        self.alpha_beta(board, color, depth, maximizing, alpha, beta)
    }

    fn terminal_score(board: &Board, color: Mark, depth: i32) -> Option<i32> {
        if let Some(win) = check_winner(board) {
            return Some(if win.mark == color {
                WIN_SCORE - depth
            } else {
                depth - WIN_SCORE
            });
        }
        if is_full(board) {
            return Some(0);
        }
        None
    }

    fn minimax_exact(&mut self, board: &mut Board, color: Mark, depth: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        if let Some(score) = Self::terminal_score(board, color, depth) {
            return score;
        }

        let to_move = if maximizing { color } else { color.opponent() };
        let mut best = if maximizing { -INF } else { INF };

        for mov in board.empty_cells() {
            board.place(mov, to_move);
            let score = self.minimax_exact(board, color, depth + 1, !maximizing);
            board.remove(mov);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        color: Mark,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = Self::terminal_score(board, color, depth) {
            return score;
        }

        let to_move = if maximizing { color } else { color.opponent() };
        let mut best = if maximizing { -INF } else { INF };

        for mov in board.empty_cells() {
            board.place(mov, to_move);
            let score = self.alpha_beta(board, color, depth + 1, !maximizing, alpha, beta);
            board.remove(mov);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate;

    fn pos(idx: usize) -> Pos {
        Pos::from_index(idx)
    }

    #[test]
    fn test_blocks_row_threat() {
        let board: Board = "XX..O....".parse().unwrap();
        let result = Searcher::new().search(&board, Mark::O);
        assert_eq!(result.best_move, Some(pos(2)));
    }

    #[test]
    fn test_prefers_immediate_win_over_fork() {
        // O . X
        // . O .
        // X . .
        // O wins at once on 8. Playing 1 or 3 forks and wins two plies
        // later; without depth shading the lower index would be kept.
        let board: Board = "O.X.O.X..".parse().unwrap();
        let result = Searcher::new().search(&board, Mark::O);
        assert_eq!(result.best_move, Some(pos(8)));
        assert_eq!(result.score, WIN_SCORE);

        let scores = Searcher::new().score_moves(&board, Mark::O);
        let value_of = |idx: usize| scores.iter().find(|(p, _)| *p == pos(idx)).unwrap().1;
        assert_eq!(value_of(1), WIN_SCORE - 2);
        assert_eq!(value_of(3), WIN_SCORE - 2);
        assert_eq!(value_of(8), WIN_SCORE);
    }

    #[test]
    fn test_takes_immediate_win_when_lowest() {
        // O O .
        // X X .
        // X . .
        let board: Board = "OO.XX.X..".parse().unwrap();
        let result = Searcher::new().search(&board, Mark::O);
        assert_eq!(result.best_move, Some(pos(2)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_depth_shading_values() {
        // O wins immediately: root child is terminal at depth 0
        let board: Board = "OO.XX....".parse().unwrap();
        let scores = Searcher::new().score_moves(&board, Mark::O);
        assert_eq!(scores[0], (pos(2), WIN_SCORE));
    }

    #[test]
    fn test_no_move_on_full_board() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let result = Searcher::new().search(&board, Mark::O);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_board_unchanged() {
        let board: Board = "X...O...X".parse().unwrap();
        let before = board;
        let _ = Searcher::new().search(&board, Mark::O);
        let _ = Searcher::with_alpha_beta(true).search(&board, Mark::O);
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let result = Searcher::with_alpha_beta(true).search(&Board::new(), Mark::X);
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        // Every position reachable in the first four plies
        fn walk(board: &mut Board, to_move: Mark, plies: u32, seen: &mut Vec<Board>) {
            if evaluate(board, true).is_terminal() {
                return;
            }
            seen.push(*board);
            if plies == 0 {
                return;
            }
            let empties: Vec<Pos> = board.empty_cells().collect();
            for mov in empties {
                board.place(mov, to_move);
                walk(board, to_move.opponent(), plies - 1, seen);
                board.remove(mov);
            }
        }

        let mut positions = Vec::new();
        walk(&mut Board::new(), Mark::X, 3, &mut positions);
        positions.sort_by_key(|b| (b.x.bits(), b.o.bits()));
        positions.dedup();

        for board in positions {
            let to_move = if board.x.count() > board.o.count() {
                Mark::O
            } else {
                Mark::X
            };
            let plain = Searcher::new().search(&board, to_move);
            let mut pruned_searcher = Searcher::with_alpha_beta(true);
            let pruned = pruned_searcher.search(&board, to_move);
            assert_eq!(plain.best_move, pruned.best_move, "board:\n{board}");
            assert_eq!(plain.score, pruned.score, "board:\n{board}");
            assert!(pruned.nodes <= plain.nodes);
        }
    }

    #[test]
    fn test_node_count() {
        let mut searcher = Searcher::new();
        let board: Board = "XO.XO....".parse().unwrap();
        let result = searcher.search(&board, Mark::X);
        assert!(result.nodes > 0);
        assert_eq!(searcher.nodes(), result.nodes);
    }
}
