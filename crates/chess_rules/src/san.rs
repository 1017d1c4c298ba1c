//! Standard Algebraic Notation in both directions.

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::movegen::legal_moves;
use crate::types::*;

/// SAN for `mv`, which must be legal in `pos`, including the `+`/`#` suffix.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let legal = legal_moves(pos);
    let next = pos.apply(mv);
    let mut san = san_body(pos, mv, &legal);
    if let Some(suffix) = check_suffix(&next, &legal_moves(&next)) {
        san.push(suffix);
    }
    san
}

/// SAN without the check suffix. `legal` is the legal move list of `pos`,
/// used for disambiguation.
pub(crate) fn san_body(pos: &Position, mv: Move, legal: &[Move]) -> String {
    match mv.kind {
        MoveKind::CastleKingside => return "O-O".to_string(),
        MoveKind::CastleQueenside => return "O-O-O".to_string(),
        _ => {}
    }
    let piece = pos
        .piece_at(mv.from)
        .unwrap_or_else(|| panic!("no piece on {} for move {mv} in {pos}", mv.from));

    let mut san = String::with_capacity(8);
    match piece.kind.san_letter() {
        None => {
            if mv.is_capture() {
                san.push(mv.from.file_char());
            }
        }
        Some(letter) => {
            san.push(letter);
            let rivals: Vec<Square> = legal
                .iter()
                .filter(|m| m.to == mv.to && m.from != mv.from)
                .filter(|m| pos.piece_at(m.from).map(|p| p.kind) == Some(piece.kind))
                .map(|m| m.from)
                .collect();
            if !rivals.is_empty() {
                if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
                    san.push(mv.from.file_char());
                } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
                    san.push(mv.from.rank_char());
                } else {
                    san.push(mv.from.file_char());
                    san.push(mv.from.rank_char());
                }
            }
        }
    }
    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&mv.to.to_string());
    if let Some(promo) = mv.promotion() {
        san.push('=');
        san.push(promo.to_char().to_ascii_uppercase());
    }
    san
}

/// `#` if the side to move in `next` is mated, `+` if merely in check.
pub(crate) fn check_suffix(next: &Position, next_legal: &[Move]) -> Option<char> {
    if !next.in_check(next.side_to_move()) {
        None
    } else if next_legal.is_empty() {
        Some('#')
    } else {
        Some('+')
    }
}

/// Resolve a SAN string against the legal moves of `pos`.
///
/// Trailing `+`, `#`, `!` and `?` are ignored, castling may be written with
/// zeros, and the promotion piece may follow the square with or without `=`.
/// The `x` marker must be present exactly when the move captures.
pub fn parse_san(pos: &Position, text: &str) -> ChessResult<Move> {
    let invalid = |reason: &'static str| ChessError::InvalidNotation {
        text: text.to_string(),
        reason,
    };
    let san = text.trim().trim_end_matches(['+', '#', '!', '?']);
    if san.is_empty() {
        return Err(invalid("empty move"));
    }
    if !san.is_ascii() {
        return Err(invalid("unexpected character"));
    }
    let legal = legal_moves(pos);

    let castle = match san {
        "O-O" | "0-0" => Some(MoveKind::CastleKingside),
        "O-O-O" | "0-0-0" => Some(MoveKind::CastleQueenside),
        _ => None,
    };
    if let Some(kind) = castle {
        return legal
            .into_iter()
            .find(|m| m.kind == kind)
            .ok_or_else(|| invalid("castling is not legal here"));
    }

    let pattern = SanPattern::parse(san).ok_or_else(|| invalid("not a SAN move"))?;

    let candidates: Vec<Move> = legal
        .into_iter()
        .filter(|m| m.to == pattern.to)
        .filter(|m| pos.piece_at(m.from).map(|p| p.kind) == Some(pattern.piece))
        .filter(|m| pattern.from_file.is_none_or(|f| m.from.file() == f))
        .filter(|m| pattern.from_rank.is_none_or(|r| m.from.rank() == r))
        .filter(|m| m.is_capture() == pattern.capture)
        .collect();
    let Some(&first) = candidates.first() else {
        return Err(invalid("no legal move matches"));
    };

    let promotes = candidates.iter().any(|m| m.promotion().is_some());
    let bad_promotion = ChessError::InvalidPromotion {
        from: first.from,
        to: first.to,
        requested: pattern.promotion,
    };
    let chosen: Vec<Move> = match pattern.promotion {
        None if promotes => return Err(bad_promotion),
        Some(_) if !promotes => return Err(bad_promotion),
        Some(kind) if !kind.is_promotion_target() => return Err(bad_promotion),
        None => candidates,
        Some(kind) => candidates
            .into_iter()
            .filter(|m| m.promotion() == Some(kind))
            .collect(),
    };

    match chosen.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(invalid("no legal move matches")),
        _ => Err(invalid("ambiguous move")),
    }
}

/// The pieces of a non-castling SAN move.
struct SanPattern {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    capture: bool,
    to: Square,
    promotion: Option<PieceKind>,
}

impl SanPattern {
    fn parse(san: &str) -> Option<SanPattern> {
        let (body, promotion) = split_promotion(san)?;

        let (piece, rest) = match body.as_bytes().first().copied()? {
            b'K' => (PieceKind::King, &body[1..]),
            b'Q' => (PieceKind::Queen, &body[1..]),
            b'R' => (PieceKind::Rook, &body[1..]),
            b'B' => (PieceKind::Bishop, &body[1..]),
            b'N' => (PieceKind::Knight, &body[1..]),
            _ => (PieceKind::Pawn, body),
        };
        if rest.len() < 2 {
            return None;
        }
        let (prefix, target) = rest.split_at(rest.len() - 2);
        let to: Square = target.parse().ok()?;

        let (prefix, capture) = match prefix.strip_suffix('x') {
            Some(p) => (p, true),
            None => (prefix, false),
        };

        let mut from_file = None;
        let mut from_rank = None;
        for b in prefix.bytes() {
            match b {
                b'a'..=b'h' if from_file.is_none() && from_rank.is_none() => {
                    from_file = Some(b - b'a');
                }
                b'1'..=b'8' if from_rank.is_none() => from_rank = Some(b - b'1'),
                _ => return None,
            }
        }
        if piece == PieceKind::Pawn && (from_rank.is_some() || capture != from_file.is_some()) {
            return None;
        }
        if piece != PieceKind::Pawn && promotion.is_some() {
            return None;
        }

        Some(SanPattern {
            piece,
            from_file,
            from_rank,
            capture,
            to,
            promotion,
        })
    }
}

/// Splits `e8=Q` or `e8Q` into the move body and the promotion piece.
fn split_promotion(san: &str) -> Option<(&str, Option<PieceKind>)> {
    if let Some((body, piece)) = san.split_once('=') {
        let mut chars = piece.chars();
        let kind = chars.next().and_then(PieceKind::from_char)?;
        if chars.next().is_some() {
            return None;
        }
        return Some((body, Some(kind)));
    }
    let bytes = san.as_bytes();
    if let [.., b'1' | b'8', letter @ (b'Q' | b'R' | b'B' | b'N')] = bytes {
        return Some((&san[..san.len() - 1], PieceKind::from_char(*letter as char)));
    }
    Some((san, None))
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
