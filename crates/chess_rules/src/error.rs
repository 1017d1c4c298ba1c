//! Error types for game operations.
//!
//! Every variant is recoverable: an operation that returns one of these has
//! left the game exactly as it was.

use thiserror::Error;

use crate::fen::PositionError;
use crate::game::GameStatus;
use crate::types::{PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// No legal move goes from `from` to `to`.
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// The promotion piece is missing, not a legal promotion target, or
    /// supplied for a move that does not promote.
    #[error("invalid promotion {requested:?} for move {from} to {to}")]
    InvalidPromotion {
        from: Square,
        to: Square,
        requested: Option<PieceKind>,
    },

    /// The game has ended and accepts no further moves.
    #[error("game is over: {0}")]
    GameOver(GameStatus),

    #[error("malformed position: {0}")]
    MalformedPosition(#[from] PositionError),

    /// A square, SAN or coordinate string could not be read.
    #[error("invalid notation '{text}': {reason}")]
    InvalidNotation { text: String, reason: &'static str },

    #[error("no move to take back")]
    NothingToUndo,
}

pub type ChessResult<T> = Result<T, ChessError>;
