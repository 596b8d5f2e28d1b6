//! Terminal-state checking
//!
//! A side wins by holding all three cells of one of the eight fixed lines.
//! A draw needs a full board with no line, which only the classic modes can
//! reach: the Zen window keeps at most six marks on the board.

use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, Mark, Pos};

/// The eight winning triples: rows, then columns, then diagonals.
/// Table order is the tie-break when several lines are complete.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const fn line_mask(line: [usize; 3]) -> Bitboard {
    Bitboard::from_bits((1 << line[0]) | (1 << line[1]) | (1 << line[2]))
}

/// Bit masks for `WINNING_LINES`, same order
const LINE_MASKS: [Bitboard; 8] = [
    line_mask(WINNING_LINES[0]),
    line_mask(WINNING_LINES[1]),
    line_mask(WINNING_LINES[2]),
    line_mask(WINNING_LINES[3]),
    line_mask(WINNING_LINES[4]),
    line_mask(WINNING_LINES[5]),
    line_mask(WINNING_LINES[6]),
    line_mask(WINNING_LINES[7]),
];

/// A completed line and its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub mark: Mark,
    pub line: [Pos; 3],
}

/// Terminal state of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Win { mark: Mark, line: [Pos; 3] },
    Draw,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Winning mark, if any
    #[inline]
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

impl From<WinLine> for Outcome {
    fn from(win: WinLine) -> Self {
        Outcome::Win {
            mark: win.mark,
            line: win.line,
        }
    }
}

fn to_line(line: [usize; 3]) -> [Pos; 3] {
    line.map(Pos::from_index)
}

/// Check if `mark` holds any complete line
#[inline]
pub fn has_line(board: &Board, mark: Mark) -> bool {
    board
        .marks(mark)
        .is_some_and(|bits| LINE_MASKS.iter().any(|&mask| bits.contains_all(mask)))
}

/// Find the first complete line in table order.
///
/// Returns `None` when no line is complete. Total over any board, including
/// sparse Zen boards where both sides may hold a line at once.
pub fn check_winner(board: &Board) -> Option<WinLine> {
    for (line, &mask) in WINNING_LINES.iter().zip(LINE_MASKS.iter()) {
        for mark in [Mark::X, Mark::O] {
            if board.marks(mark).is_some_and(|bits| bits.contains_all(mask)) {
                return Some(WinLine {
                    mark,
                    line: to_line(*line),
                });
            }
        }
    }
    None
}

/// Every cell is occupied
#[inline]
pub fn is_full(board: &Board) -> bool {
    board.empty_mask().is_empty()
}

/// Classify a board. `draws_possible` is false in Zen Mode.
pub fn evaluate(board: &Board, draws_possible: bool) -> Outcome {
    if let Some(win) = check_winner(board) {
        return win.into();
    }
    if draws_possible && is_full(board) {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

/// Would placing `mark` on the empty cell `pos` complete a line for it.
pub fn completes_line(board: &Board, pos: Pos, mark: Mark) -> bool {
    if mark == Mark::Empty || !board.is_empty(pos) {
        return false;
    }
    let mut test_board = *board;
    test_board.place(pos, mark);
    has_line(&test_board, mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_detected() {
        for line in WINNING_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut board = Board::new();
                for idx in line {
                    board.place(Pos::from_index(idx), mark);
                }
                // Fill one unrelated cell with the opponent
                if let Some(other) = (0..9).find(|i| !line.contains(i)) {
                    board.place(Pos::from_index(other), mark.opponent());
                }

                let win = check_winner(&board).expect("line should be found");
                assert_eq!(win.mark, mark);
                assert_eq!(win.line, to_line(line));
            }
        }
    }

    #[test]
    fn test_full_board_without_line() {
        // X O X
        // X O O
        // O X X
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(check_winner(&board), None);
        assert!(is_full(&board));
        assert_eq!(evaluate(&board, true), Outcome::Draw);
        // Zen boards never report a draw
        assert_eq!(evaluate(&board, false), Outcome::Ongoing);
    }

    #[test]
    fn test_no_winner_on_empty() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert!(!is_full(&board));
        assert_eq!(evaluate(&board, true), Outcome::Ongoing);
    }

    #[test]
    fn test_first_line_in_table_order() {
        // X holds row 0 and column 0 at once
        let board: Board = "XXXX..X..".parse().unwrap();
        let win = check_winner(&board).unwrap();
        assert_eq!(win.line, to_line([0, 1, 2]));

        // Zen-style board where both sides hold a line: row 1 (O) precedes row 2 (X)
        let board: Board = "...OOOXXX".parse().unwrap();
        let win = check_winner(&board).unwrap();
        assert_eq!(win.mark, Mark::O);
        assert_eq!(win.line, to_line([3, 4, 5]));
    }

    #[test]
    fn test_win_beats_full() {
        let board: Board = "XXXOOXOXO".parse().unwrap();
        assert!(is_full(&board));
        assert_eq!(evaluate(&board, true).winner(), Some(Mark::X));
    }

    #[test]
    fn test_completes_line() {
        let board: Board = "XX..O....".parse().unwrap();
        assert!(completes_line(&board, Pos::from_index(2), Mark::X));
        assert!(!completes_line(&board, Pos::from_index(2), Mark::O));
        assert!(!completes_line(&board, Pos::from_index(0), Mark::X));
        assert!(!completes_line(&board, Pos::from_index(2), Mark::Empty));
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(!Outcome::Ongoing.is_terminal());
        assert!(Outcome::Draw.is_terminal());
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
