//! Chess rules: board state, legal move generation, move application, game
//! status tracking and SAN / FEN / coordinate notation.
//!
//! The entry point for playing is [`Game`]; [`Position`] and the free
//! functions below work on single snapshots.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod san;
pub mod types;
pub mod uci;

mod apply;

pub use bitboard::SquareSet;
pub use board::{CastlingRights, Position};
pub use error::{ChessError, ChessResult};
pub use fen::{PositionError, STARTING_FEN};
pub use game::{DrawRules, Game, GameStatus};
pub use movegen::{legal_moves, legal_moves_into, pseudo_legal_moves};
pub use perft::{divide, perft};
pub use san::{move_to_san, parse_san};
pub use types::*;
pub use uci::{move_to_uci, parse_uci, parse_uci_move};
