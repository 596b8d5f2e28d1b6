//! Zen Mode sliding window
//!
//! Each side keeps at most three marks on the board. Placing a fourth
//! removes that side's oldest surviving mark first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, Pos};

/// Maximum marks per side in Zen Mode
pub const WINDOW_SIZE: usize = 3;

/// Placement order of one side's surviving marks, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveQueue {
    moves: VecDeque<Pos>,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self {
            moves: VecDeque::with_capacity(WINDOW_SIZE),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.moves.len() >= WINDOW_SIZE
    }

    /// Oldest surviving mark
    #[inline]
    pub fn oldest(&self) -> Option<Pos> {
        self.moves.front().copied()
    }

    /// The mark that vanishes on this side's next placement
    #[inline]
    pub fn fading(&self) -> Option<Pos> {
        if self.is_full() {
            self.oldest()
        } else {
            None
        }
    }

    /// Append a placement, returning the evicted head when the window was full
    pub fn push(&mut self, pos: Pos) -> Option<Pos> {
        let evicted = if self.is_full() {
            self.moves.pop_front()
        } else {
            None
        };
        self.moves.push_back(pos);
        evicted
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.moves.iter().copied()
    }
}

/// Write `mark` at `pos`, applying the Zen window when `windowed` is set.
///
/// With the window active and `queue` already full, the oldest cell is reset
/// to empty before the new mark is written, and that evicted position is
/// returned. Outside Zen Mode the queue is left untouched.
///
/// The caller guarantees `pos` is empty.
pub fn apply_placement(
    board: &mut Board,
    queue: &mut MoveQueue,
    mark: Mark,
    pos: Pos,
    windowed: bool,
) -> Option<Pos> {
    debug_assert!(board.is_empty(pos));

    let evicted = if windowed {
        let evicted = queue.push(pos);
        if let Some(old) = evicted {
            board.remove(old);
        }
        evicted
    } else {
        None
    };

    board.place(pos, mark);
    evicted
}
