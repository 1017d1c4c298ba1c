//! Coordinate notation as used by the UCI protocol: `e2e4`, `e7e8q`.

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::movegen::legal_moves;
use crate::types::*;

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Split coordinate text into origin, destination and optional promotion
/// piece without consulting any position.
pub fn parse_uci(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let invalid = |reason: &'static str| ChessError::InvalidNotation {
        text: text.to_string(),
        reason,
    };
    let txt = text.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(invalid("expected coordinates like e2e4 or e7e8q"));
    }
    let from: Square = txt[0..2].parse().map_err(|_| invalid("bad origin square"))?;
    let to: Square = txt[2..4].parse().map_err(|_| invalid("bad destination square"))?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => Some(PieceKind::from_char(c).ok_or_else(|| invalid("bad promotion letter"))?),
    };
    Ok((from, to, promo))
}

/// Resolve coordinate text against the legal moves of `pos`, so castling and
/// en-passant flags come out right.
pub fn parse_uci_move(pos: &Position, text: &str) -> ChessResult<Move> {
    let (from, to, promo) = parse_uci(text)?;
    let mut matching = legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == from && m.to == to)
        .peekable();
    if matching.peek().is_none() {
        return Err(ChessError::IllegalMove { from, to });
    }
    matching
        .find(|m| m.promotion() == promo)
        .ok_or(ChessError::InvalidPromotion {
            from,
            to,
            requested: promo,
        })
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
