//! Error types for board fixtures and session play

use thiserror::Error;

use crate::board::Pos;

/// Failure to read a board from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 9 cells, found {0}")]
    Length(usize),
    #[error("invalid cell character {0:?}")]
    InvalidChar(char),
}

/// A session operation was rejected. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("game is not in progress")]
    NotPlaying,
    #[error("cell index {0} is off the board")]
    OutOfRange(usize),
    #[error("cell {0} is already occupied")]
    Occupied(Pos),
    #[error("it is not the automated opponent's turn")]
    NotAutomatedTurn,
    #[error("engine found no move")]
    NoMove,
    #[error("nothing to undo")]
    NothingToUndo,
}
