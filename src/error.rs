//! Error types for the Gomoku launcher and its front-ends

use thiserror::Error;

use crate::board::Pos;

/// Failures that end a front-end session or stop it from starting.
#[derive(Debug, Error)]
pub enum GomokuError {
    #[error("Invalid board size {size}: must be between {min} and {max}")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Window error: {0}")]
    Gui(String),
}

/// Reasons a move or game command is rejected. These never end a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("Position ({}, {}) is already occupied", .0.row, .0.col)]
    Occupied(Pos),

    #[error("Game is over")]
    GameOver,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("AI is thinking")]
    AiThinking,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("AI could not find a move")]
    NoMoveFound,
}
