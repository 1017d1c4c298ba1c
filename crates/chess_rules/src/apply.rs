//! Successor positions.

use crate::board::{CastleLayout, Position};
use crate::types::*;

impl Position {
    /// Returns the position after `mv`; `self` is left untouched.
    ///
    /// `mv` must come from [`crate::movegen::legal_moves`] for this
    /// position. Anything else may panic or yield a nonsensical position.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.apply_in_place(mv);
        next
    }

    pub(crate) fn apply_in_place(&mut self, mv: Move) {
        let mover = self.side_to_move();
        let Some(moving) = self.take_piece(mv.from) else {
            panic!("no piece on {} for move {}", mv.from, mv);
        };

        let mut resets_clock = moving.kind == PieceKind::Pawn;

        match mv.kind {
            MoveKind::EnPassant => {
                // The victim stands beside the origin, behind the target square.
                let victim = Square::at(mv.to.file(), mv.from.rank());
                self.set_piece(victim, None);
                resets_clock = true;
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let layout = CastleLayout::new(mover, mv.kind == MoveKind::CastleKingside);
                let rook = self.take_piece(layout.rook_from);
                self.set_piece(layout.rook_to, rook);
            }
            _ => {}
        }

        if self.take_piece(mv.to).is_some() {
            resets_clock = true;
        }
        let placed = match mv.kind {
            MoveKind::Promotion { piece, .. } => Piece::new(mover, piece),
            _ => moving,
        };
        self.set_piece(mv.to, Some(placed));

        let rights = self.castling_mut();
        if moving.kind == PieceKind::King {
            rights.revoke(mover);
        }
        rights.touch(mv.from);
        rights.touch(mv.to);

        let en_passant = match mv.kind {
            MoveKind::DoublePawnPush => Square::from_coords(
                mv.from.file() as i8,
                (mv.from.rank() + mv.to.rank()) as i8 / 2,
            ),
            _ => None,
        };
        self.set_en_passant(en_passant);

        let halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock() + 1
        };
        let fullmove_number = match mover {
            Color::White => self.fullmove_number(),
            Color::Black => self.fullmove_number() + 1,
        };
        self.set_clocks(halfmove_clock, fullmove_number);
        self.set_side_to_move(mover.other());
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod apply_tests;
