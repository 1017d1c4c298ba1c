use tracing::trace;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks};
use crate::bitboard::SquareSet;
use crate::board::{CastleLayout, Position};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
///
/// Order is deterministic: ascending origin square, then the per-piece
/// generation order below.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// # Panics
/// If the side to move has no king. Positions built through this crate
/// always have one.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    let mover = pos.side_to_move();
    assert!(
        pos.king_square(mover).is_some(),
        "position has no {mover} king: {pos}"
    );

    pseudo_legal_moves_into(pos, out);
    let pseudo = out.len();

    // Simulate each candidate and drop those that leave our king attacked.
    let mut scratch = pos.clone();
    out.retain(|&mv| {
        scratch.clone_from(pos);
        scratch.apply_in_place(mv);
        !scratch.in_check(mover)
    });
    trace!(pseudo, legal = out.len(), "generated moves");
}

/// Moves that obey piece movement rules but may expose the mover's king.
pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_legal_moves_into(pos, &mut out);
    out
}

fn pseudo_legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    let us = pos.side_to_move();
    let own = pos.occupancy_of(us);
    let occupied = pos.occupied();

    for (from, pc) in pos.pieces_of(us) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => push_targets(pos, from, knight_attacks(from) & !own, out),
            PieceKind::Bishop => push_targets(pos, from, bishop_attacks(from, occupied) & !own, out),
            PieceKind::Rook => push_targets(pos, from, rook_attacks(from, occupied) & !own, out),
            PieceKind::Queen => push_targets(pos, from, queen_attacks(from, occupied) & !own, out),
            PieceKind::King => {
                push_targets(pos, from, king_attacks(from) & !own, out);
                gen_castles(pos, from, us, out);
            }
        }
    }
}

fn push_targets(pos: &Position, from: Square, targets: SquareSet, out: &mut Vec<Move>) {
    for to in targets {
        let kind = if pos.piece_at(to).is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        };
        out.push(Move::new(from, to, kind));
    }
}

fn push_pawn_move(from: Square, to: Square, capture: bool, us: Color, out: &mut Vec<Move>) {
    if to.rank() == us.promotion_rank() {
        for piece in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, MoveKind::Promotion { piece, capture }));
        }
    } else if capture {
        out.push(Move::new(from, to, MoveKind::Capture));
    } else {
        out.push(Move::new(from, to, MoveKind::Normal));
    }
}

fn gen_pawn(pos: &Position, from: Square, us: Color, out: &mut Vec<Move>) {
    let dir = us.pawn_direction();

    // forward 1, then 2 from the start rank
    if let Some(one) = from.offset(0, dir)
        && pos.piece_at(one).is_none()
    {
        push_pawn_move(from, one, false, us, out);
        if from.rank() == us.pawn_start_rank()
            && let Some(two) = from.offset(0, 2 * dir)
            && pos.piece_at(two).is_none()
        {
            out.push(Move::new(from, two, MoveKind::DoublePawnPush));
        }
    }

    // captures + en-passant
    for to in pawn_attacks(from, us) {
        match pos.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, true, us, out),
            None if pos.en_passant() == Some(to) => {
                out.push(Move::new(from, to, MoveKind::EnPassant));
            }
            _ => {}
        }
    }
}

fn gen_castles(pos: &Position, from: Square, us: Color, out: &mut Vec<Move>) {
    let rights = pos.castling();
    if !rights.kingside(us) && !rights.queenside(us) {
        return;
    }
    // Must be on the original king square and not castle out of check.
    if from != Square::at(4, us.back_rank()) || pos.in_check(us) {
        return;
    }

    let them = us.other();
    let rank = us.back_rank();
    let rook = Some(Piece::new(us, PieceKind::Rook));
    for kingside in [true, false] {
        let allowed = if kingside {
            rights.kingside(us)
        } else {
            rights.queenside(us)
        };
        if !allowed {
            continue;
        }
        let layout = CastleLayout::new(us, kingside);
        if pos.piece_at(layout.rook_from) != rook {
            continue;
        }
        let clear = layout
            .empty_files
            .iter()
            .all(|&f| pos.piece_at(Square::at(f, rank)).is_none());
        let safe = layout
            .king_path_files
            .iter()
            .all(|&f| !pos.is_square_attacked(Square::at(f, rank), them));
        if clear && safe {
            out.push(Move::new(layout.king_from, layout.king_to, layout.kind));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
