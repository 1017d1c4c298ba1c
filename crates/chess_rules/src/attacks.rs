//! Precomputed attack sets.
//!
//! Leaper tables (knight, king, pawn captures) are built at compile time
//! from their step deltas. Sliders walk precomputed rays and cut each ray
//! at its nearest blocker.

use crate::bitboard::SquareSet;
use crate::types::{Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

/// Ray directions: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(i8, i8); 8] = KING_DELTAS;
/// Whether stepping in the direction increases the square index.
const ASCENDING: [bool; 8] = [true, true, true, false, false, false, false, true];
const ORTHOGONAL: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL: [usize; 4] = [1, 3, 5, 7];

const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

const fn leaper_table(deltas: &[(i8, i8)]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let (df, dr) = deltas[i];
            if on_board(file + df, rank + dr) {
                bits |= 1u64 << ((rank + dr) * 8 + file + df) as u32;
            }
            i += 1;
        }
        table[sq] = SquareSet(bits);
        sq += 1;
    }
    table
}

const fn ray_table() -> [[SquareSet; 64]; 8] {
    let mut rays = [[SquareSet::EMPTY; 64]; 8];
    let mut dir = 0usize;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0usize;
        while sq < 64 {
            let mut file = (sq % 8) as i8 + df;
            let mut rank = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while on_board(file, rank) {
                bits |= 1u64 << (rank * 8 + file) as u32;
                file += df;
                rank += dr;
            }
            rays[dir][sq] = SquareSet(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
}

pub static KNIGHT_ATTACKS: [SquareSet; 64] = leaper_table(&KNIGHT_DELTAS);
pub static KING_ATTACKS: [SquareSet; 64] = leaper_table(&KING_DELTAS);
/// Squares a pawn of the indexed color captures onto.
pub static PAWN_ATTACKS: [[SquareSet; 64]; 2] = [
    leaper_table(&WHITE_PAWN_DELTAS),
    leaper_table(&BLACK_PAWN_DELTAS),
];
/// `RAYS[dir][sq]`: every square strictly beyond `sq` in direction `dir`.
pub static RAYS: [[SquareSet; 64]; 8] = ray_table();

#[inline(always)]
pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_ATTACKS[color.idx()][sq.index()]
}

#[inline]
fn ray_attacks(sq: Square, dir: usize, occupied: SquareSet) -> SquareSet {
    let ray = RAYS[dir][sq.index()];
    let blockers = ray & occupied;
    let nearest = if ASCENDING[dir] {
        blockers.first()
    } else {
        blockers.last()
    };
    match nearest {
        // The blocker itself stays attacked.
        Some(blocker) => ray & !RAYS[dir][blocker.index()],
        None => ray,
    }
}

#[inline]
pub fn rook_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    ORTHOGONAL
        .iter()
        .fold(SquareSet::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub fn bishop_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    DIAGONAL
        .iter()
        .fold(SquareSet::EMPTY, |acc, &dir| acc | ray_attacks(sq, dir, occupied))
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
