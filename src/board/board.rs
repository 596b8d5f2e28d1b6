//! Board structure backed by one bitboard per side

use std::fmt;
use std::str::FromStr;

use super::bitboard::Bitboard;
use super::{Mark, Pos, BOARD_SIZE, TOTAL_CELLS};
use crate::error::ParseBoardError;

/// 3x3 game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// X marks bitboard
    pub x: Bitboard,
    /// O marks bitboard
    pub o: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Build a board from nine cells in row-major order
    pub fn from_cells(cells: [Mark; TOTAL_CELLS]) -> Self {
        let mut board = Self::new();
        for (idx, mark) in cells.into_iter().enumerate() {
            board.place(Pos::from_index(idx), mark);
        }
        board
    }

    /// Nine cells in row-major order
    pub fn cells(&self) -> [Mark; TOTAL_CELLS] {
        let mut cells = [Mark::Empty; TOTAL_CELLS];
        for (idx, cell) in cells.iter_mut().enumerate() {
            *cell = self.get(Pos::from_index(idx));
        }
        cells
    }

    /// Get mark at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        if self.x.get(pos) {
            Mark::X
        } else if self.o.get(pos) {
            Mark::O
        } else {
            Mark::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.x.get(pos) && !self.o.get(pos)
    }

    /// Write a mark without any rule processing.
    /// Placing `Empty` clears the cell.
    #[inline]
    pub fn place(&mut self, pos: Pos, mark: Mark) {
        self.remove(pos);
        match mark {
            Mark::X => self.x.set(pos),
            Mark::O => self.o.set(pos),
            Mark::Empty => {}
        }
    }

    /// Reset a cell to empty
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        self.x.clear(pos);
        self.o.clear(pos);
    }

    /// Get bitboard for a mark (returns None for Empty)
    #[inline]
    pub fn marks(&self, mark: Mark) -> Option<&Bitboard> {
        match mark {
            Mark::X => Some(&self.x),
            Mark::O => Some(&self.o),
            Mark::Empty => None,
        }
    }

    /// Bitboard of the empty cells
    #[inline]
    pub fn empty_mask(&self) -> Bitboard {
        !(self.x | self.o)
    }

    /// Empty cells in ascending index order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> {
        self.empty_mask().iter_ones()
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        TOTAL_CELLS as u32 - self.mark_count()
    }

    /// Total marks on board
    #[inline]
    pub fn mark_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }
}

/// Parses nine cells: `X`/`O` (either case) for marks, `.`, `_`, `-` or a
/// space for empty. `|` and line breaks are ignored so grid-shaped fixtures
/// like `"XX.|.O.|..."` read naturally.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(TOTAL_CELLS);
        for ch in s.chars() {
            let mark = match ch {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '_' | '-' | ' ' => Mark::Empty,
                '|' | '\n' | '\r' => continue,
                other => return Err(ParseBoardError::InvalidChar(other)),
            };
            cells.push(mark);
        }

        let cells: [Mark; TOTAL_CELLS] = cells
            .try_into()
            .map_err(|cells: Vec<Mark>| ParseBoardError::Length(cells.len()))?;
        Ok(Self::from_cells(cells))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..BOARD_SIZE {
                let mark = self.get(Pos::new(row as u8, col as u8));
                write!(f, "{}", mark.symbol())?;
            }
        }
        Ok(())
    }
}
