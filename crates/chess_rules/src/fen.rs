//! Forsyth-Edwards Notation: the position interchange string.
//!
//! Parsing is strict about structure and about the board invariants the
//! rest of the crate relies on (one king per side, no pawns on the back
//! ranks, a consistent en-passant target, the side not to move not in
//! check). Castling rights are taken as given; a right without its rook
//! simply never produces a castling move.

use thiserror::Error;

use crate::bitboard::SquareSet;
use crate::board::{CastlingRights, Position};
use crate::types::*;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("invalid piece letter '{0}'")]
    InvalidPiece(char),
    #[error("rank {rank} describes {files} files instead of 8")]
    RankWidth { rank: u8, files: u32 },
    #[error("rank {rank} has two adjacent empty-square counts")]
    AdjacentDigits { rank: u8 },
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),
    #[error("invalid {field} '{value}'")]
    Counter { field: &'static str, value: String },
    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),
    #[error("{0}, who is not on move, is in check")]
    OpponentInCheck(Color),
}

pub fn parse_fen(fen: &str) -> Result<Position, PositionError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if !(4..=6).contains(&parts.len()) {
        return Err(PositionError::FieldCount(parts.len()));
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, parts[0])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(PositionError::SideToMove(other.to_string())),
    };
    pos.set_side_to_move(side_to_move);
    pos.set_castling(parse_castling(parts[2])?);
    pos.set_en_passant(parse_en_passant(&pos, parts[3])?);

    let halfmove_clock = parse_counter(parts.get(4).copied().unwrap_or("0"), "halfmove clock")?;
    let fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"), "fullmove number")?;
    if fullmove_number == 0 {
        return Err(PositionError::Counter {
            field: "fullmove number",
            value: "0".to_string(),
        });
    }
    pos.set_clocks(halfmove_clock, fullmove_number);

    validate(&pos)?;
    Ok(pos)
}

fn parse_placement(pos: &mut Position, board: &str) -> Result<(), PositionError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::RankCount(ranks.len()));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut file: u32 = 0;
        let mut last_was_digit = false;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                if last_was_digit {
                    return Err(PositionError::AdjacentDigits { rank: rank + 1 });
                }
                file += d;
                last_was_digit = true;
            } else {
                let pc = Piece::from_fen_char(ch).ok_or(PositionError::InvalidPiece(ch))?;
                if file >= 8 {
                    return Err(PositionError::RankWidth {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                pos.set_piece(Square::at(file as u8, rank), Some(pc));
                file += 1;
                last_was_digit = false;
            }
        }
        if file != 8 {
            return Err(PositionError::RankWidth {
                rank: rank + 1,
                files: file,
            });
        }
    }
    Ok(())
}

/// Castling letters must appear in `KQkq` order without repeats.
fn parse_castling(field: &str) -> Result<CastlingRights, PositionError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    let invalid = || PositionError::Castling(field.to_string());
    let mut next_allowed = 0;
    for c in field.chars() {
        let slot = "KQkq".find(c).ok_or_else(invalid)?;
        if slot < next_allowed {
            return Err(invalid());
        }
        next_allowed = slot + 1;
        match c {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            _ => rights.black_queenside = true,
        }
    }
    Ok(rights)
}

/// The target must be the empty square just skipped by a double-pushed pawn
/// of the side not on move.
fn parse_en_passant(pos: &Position, field: &str) -> Result<Option<Square>, PositionError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || PositionError::EnPassant(field.to_string());
    let target: Square = field.parse().map_err(|_| invalid())?;

    let us = pos.side_to_move();
    let pusher = us.other();
    if target.rank() as i8 != pusher.pawn_start_rank() as i8 + pusher.pawn_direction() {
        return Err(invalid());
    }
    let pushed_to = target.offset(0, pusher.pawn_direction()).ok_or_else(invalid)?;
    if pos.piece_at(pushed_to) != Some(Piece::new(pusher, PieceKind::Pawn))
        || pos.piece_at(target).is_some()
    {
        return Err(invalid());
    }
    Ok(Some(target))
}

fn parse_counter(value: &str, field: &'static str) -> Result<u32, PositionError> {
    let invalid = || PositionError::Counter {
        field,
        value: value.to_string(),
    };
    // Digits only: `u32::from_str` accepts a leading `+`.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn validate(pos: &Position) -> Result<(), PositionError> {
    for color in Color::BOTH {
        let count = pos
            .pieces_of(color)
            .filter(|(_, pc)| pc.kind == PieceKind::King)
            .count();
        if count != 1 {
            return Err(PositionError::KingCount { color, count });
        }
        let pawns_on_back_rank = pos
            .pieces_of(color)
            .find(|&(sq, pc)| pc.kind == PieceKind::Pawn && SquareSet::BACK_RANKS.contains(sq));
        if let Some((sq, _)) = pawns_on_back_rank {
            return Err(PositionError::PawnOnBackRank(sq));
        }
    }
    let waiting = pos.side_to_move().other();
    if pos.in_check(waiting) {
        return Err(PositionError::OpponentInCheck(waiting));
    }
    Ok(())
}

pub fn format_fen(pos: &Position) -> String {
    format!(
        "{} {} {}",
        signature(pos),
        pos.halfmove_clock(),
        pos.fullmove_number()
    )
}

/// The first four FEN fields.
pub fn signature(pos: &Position) -> String {
    let side = match pos.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let ep = pos
        .en_passant()
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());
    format!(
        "{} {} {} {}",
        placement(pos),
        side,
        castling_field(pos.castling()),
        ep
    )
}

fn placement(pos: &Position) -> String {
    let mut out = String::with_capacity(72);
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match pos.piece_at(Square::at(file, rank)) {
                Some(pc) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(pc.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

fn castling_field(rights: CastlingRights) -> String {
    if rights.is_empty() {
        return "-".to_string();
    }
    [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ]
    .iter()
    .filter(|(set, _)| *set)
    .map(|&(_, c)| c)
    .collect()
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
