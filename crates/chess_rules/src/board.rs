//! Board state: one immutable snapshot per ply.
//!
//! A [`Position`] is only mutated internally, while it is being built by the
//! FEN parser or by [`Position::apply`]. Callers always see whole values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::SquareSet;
use crate::error::ChessError;
use crate::fen;
use crate::types::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub(crate) fn revoke(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Drops the right tied to a rook home square once anything leaves or
    /// lands on it.
    pub(crate) fn touch(&mut self, sq: Square) {
        match sq {
            Square::A1 => self.white_queenside = false,
            Square::H1 => self.white_kingside = false,
            Square::A8 => self.black_queenside = false,
            Square::H8 => self.black_kingside = false,
            _ => {}
        }
    }
}

/// Squares involved in one castling move.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastleLayout {
    pub kind: MoveKind,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Files that must be empty between king and rook.
    pub empty_files: &'static [u8],
    /// Files the king crosses or lands on; none may be attacked.
    pub king_path_files: [u8; 2],
}

impl CastleLayout {
    pub fn new(color: Color, kingside: bool) -> Self {
        let rank = color.back_rank();
        if kingside {
            CastleLayout {
                kind: MoveKind::CastleKingside,
                king_from: Square::at(4, rank),
                king_to: Square::at(6, rank),
                rook_from: Square::at(7, rank),
                rook_to: Square::at(5, rank),
                empty_files: &[5, 6],
                king_path_files: [5, 6],
            }
        } else {
            CastleLayout {
                kind: MoveKind::CastleQueenside,
                king_from: Square::at(4, rank),
                king_to: Square::at(2, rank),
                rook_from: Square::at(0, rank),
                rook_to: Square::at(3, rank),
                empty_files: &[1, 2, 3],
                king_path_files: [3, 2],
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    occupancy: [SquareSet; 2],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub(crate) fn empty() -> Self {
        Position {
            board: [None; 64],
            occupancy: [SquareSet::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as u8;
            for color in Color::BOTH {
                p.set_piece(Square::at(file, color.back_rank()), Some(Piece::new(color, kind)));
                p.set_piece(
                    Square::at(file, color.pawn_start_rank()),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        p
    }

    /// Parses a FEN string. See [`crate::fen::parse_fen`] for what is rejected.
    pub fn from_fen(text: &str) -> Result<Self, ChessError> {
        Ok(fen::parse_fen(text)?)
    }

    pub fn to_fen(&self) -> String {
        fen::format_fen(self)
    }

    /// Repetition key: placement, side to move, castling rights and
    /// en-passant target. Move counters are left out.
    pub fn signature(&self) -> String {
        fen::signature(self)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn occupancy_of(&self, color: Color) -> SquareSet {
        self.occupancy[color.idx()]
    }

    pub fn occupied(&self) -> SquareSet {
        self.occupancy[0] | self.occupancy[1]
    }

    /// All pieces of `color` with their squares, in ascending square order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupancy_of(color)
            .filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces_of(color)
            .find(|&(_, pc)| pc == king)
            .map(|(sq, _)| sq)
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => self.is_square_attacked(ksq, color.other()),
            None => false,
        }
    }

    /// Whether any piece of `by` attacks `target`, ignoring pins.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let attackers = self.occupancy_of(by);
        let occupied = self.occupied();
        let holds = |sq: Square, kinds: &[PieceKind]| {
            self.piece_at(sq)
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks target iff a pawn of the other color on
        // target would attack the pawn's square.
        if (pawn_attacks(target, by.other()) & attackers).any(|sq| holds(sq, &[PieceKind::Pawn])) {
            return true;
        }
        if (knight_attacks(target) & attackers).any(|sq| holds(sq, &[PieceKind::Knight])) {
            return true;
        }
        if (king_attacks(target) & attackers).any(|sq| holds(sq, &[PieceKind::King])) {
            return true;
        }
        if (bishop_attacks(target, occupied) & attackers)
            .any(|sq| holds(sq, &[PieceKind::Bishop, PieceKind::Queen]))
        {
            return true;
        }
        (rook_attacks(target, occupied) & attackers)
            .any(|sq| holds(sq, &[PieceKind::Rook, PieceKind::Queen]))
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece against a bare king, or bishops that all stand on one color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishops = SquareSet::EMPTY;
        for color in Color::BOTH {
            for (sq, pc) in self.pieces_of(color) {
                match pc.kind {
                    PieceKind::King => {}
                    PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                    PieceKind::Knight => {
                        minors += 1;
                        knights += 1;
                    }
                    PieceKind::Bishop => {
                        minors += 1;
                        bishops.insert(sq);
                    }
                }
            }
        }
        if minors <= 1 {
            return true;
        }
        knights == 0
            && ((bishops & SquareSet::LIGHT_SQUARES).is_empty()
                || (bishops & SquareSet::DARK_SQUARES).is_empty())
    }

    // ---- internal mutation, used while building a snapshot ----

    pub(crate) fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        if let Some(old) = self.board[sq.index()] {
            self.occupancy[old.color.idx()].remove(sq);
        }
        if let Some(new) = pc {
            self.occupancy[new.color.idx()].insert(sq);
        }
        self.board[sq.index()] = pc;
    }

    pub(crate) fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        let pc = self.piece_at(sq);
        self.set_piece(sq, None);
        pc
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }

    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
