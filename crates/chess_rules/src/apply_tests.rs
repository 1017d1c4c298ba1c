use super::*;
use crate::board::CastlingRights;
use crate::movegen::legal_moves;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn find(pos: &Position, from: &str, to: &str) -> Move {
    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == sq(from) && m.to == sq(to) && m.promotion().is_none_or(|p| p == PieceKind::Queen))
        .unwrap_or_else(|| panic!("{from}{to} should be legal in {pos}"))
}

#[test]
fn test_apply_leaves_input_untouched() {
    let pos = Position::startpos();
    let before = pos.clone();
    let next = pos.apply(find(&pos, "e2", "e4"));
    assert_eq!(pos, before);
    assert_ne!(next, before);
}

#[test]
fn test_double_push_sets_en_passant_target() {
    let pos = Position::startpos();
    let next = pos.apply(find(&pos, "e2", "e4"));
    assert_eq!(next.en_passant(), Some(sq("e3")));
    assert_eq!(next.halfmove_clock(), 0);
    assert_eq!(next.fullmove_number(), 1);
    assert_eq!(next.side_to_move(), Color::Black);

    let reply = next.apply(find(&next, "g8", "f6"));
    assert_eq!(reply.en_passant(), None);
    assert_eq!(reply.halfmove_clock(), 1);
    assert_eq!(reply.fullmove_number(), 2);
}

#[test]
fn test_en_passant_removes_pawn_behind_target() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let mv = find(&pos, "e5", "d6");
    assert_eq!(mv.kind, MoveKind::EnPassant);
    let next = pos.apply(mv);
    assert_eq!(next.piece_at(sq("d5")), None);
    assert_eq!(
        next.piece_at(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(next.pieces_of(Color::Black).count(), 1);
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_castling_moves_rook() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();

    let short = pos.apply(find(&pos, "e1", "g1"));
    assert_eq!(short.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(short.piece_at(Square::H1), None);
    assert!(!short.castling().kingside(Color::White));
    assert!(!short.castling().queenside(Color::White));
    assert!(short.castling().kingside(Color::Black));
    assert_eq!(short.halfmove_clock(), 4);

    let long = short.apply(find(&short, "e8", "c8"));
    assert_eq!(long.piece_at(sq("d8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert_eq!(long.piece_at(Square::A8), None);
    assert_eq!(long.castling(), CastlingRights::NONE);
    assert_eq!(long.fullmove_number(), 11);
}

#[test]
fn test_rook_capture_revokes_opponent_right() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let next = pos.apply(find(&pos, "a1", "a8"));
    assert!(!next.castling().queenside(Color::White));
    assert!(!next.castling().queenside(Color::Black));
    assert!(next.castling().kingside(Color::White));
    assert!(next.castling().kingside(Color::Black));
    assert_eq!(next.halfmove_clock(), 0);
}

#[test]
fn test_promotion_replaces_pawn() {
    let pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 5 40").unwrap();
    let knight_capture = legal_moves(&pos)
        .into_iter()
        .find(|m| m.to == sq("b8") && m.promotion() == Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(
        knight_capture.kind,
        MoveKind::Promotion {
            piece: PieceKind::Knight,
            capture: true
        }
    );
    let next = pos.apply(knight_capture);
    assert_eq!(next.piece_at(sq("b8")), Some(Piece::new(Color::White, PieceKind::Knight)));
    assert_eq!(next.piece_at(sq("a7")), None);
    assert_eq!(next.halfmove_clock(), 0);
}
