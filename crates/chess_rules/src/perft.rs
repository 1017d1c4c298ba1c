use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal move sequences of exactly `depth` plies from `pos`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(pos, buf);
        // Bulk count at the last ply: every legal move is one leaf.
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        let mut child = pos.clone();
        for mv in buf.iter().copied() {
            child.clone_from(pos);
            child.apply_in_place(mv);
            nodes += inner(&child, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Node count below each root move, in generation order.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    crate::movegen::legal_moves(pos)
        .into_iter()
        .map(|mv| (mv, perft(&pos.apply(mv), depth - 1)))
        .collect()
}

#[cfg(test)]
#[path = "perft_tests.rs"]
mod perft_tests;
