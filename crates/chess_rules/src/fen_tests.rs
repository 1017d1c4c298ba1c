use super::*;

#[test]
fn test_startpos_round_trip() {
    let pos = parse_fen(STARTING_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(format_fen(&pos), STARTING_FEN);
}

#[test]
fn test_round_trip_preserves_every_field() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 17 42",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 3 20",
    ];
    for fen in fens {
        assert_eq!(format_fen(&parse_fen(fen).unwrap()), fen);
    }
}

#[test]
fn test_four_field_fen_defaults_counters() {
    let pos = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn test_structural_errors() {
    let cases = [
        ("", PositionError::FieldCount(0)),
        (
            "8/8/8/8/8/8/8 w - - 0 1",
            PositionError::RankCount(7),
        ),
        (
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            PositionError::InvalidPiece('X'),
        ),
        (
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            PositionError::RankWidth { rank: 1, files: 9 },
        ),
        (
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            PositionError::RankWidth { rank: 1, files: 7 },
        ),
        (
            "4k3/8/8/8/8/8/8/44K w - - 0 1",
            PositionError::AdjacentDigits { rank: 1 },
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            PositionError::SideToMove("x".to_string()),
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w QK - 0 1",
            PositionError::Castling("QK".to_string()),
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w KK - 0 1",
            PositionError::Castling("KK".to_string()),
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w - e9 0 1",
            PositionError::EnPassant("e9".to_string()),
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",
            PositionError::Counter {
                field: "halfmove clock",
                value: "x".to_string(),
            },
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w - - +5 1",
            PositionError::Counter {
                field: "halfmove clock",
                value: "+5".to_string(),
            },
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w - - 0 -1",
            PositionError::Counter {
                field: "fullmove number",
                value: "-1".to_string(),
            },
        ),
        (
            "4k3/8/8/8/8/8/8/4K3 w - - 0 0",
            PositionError::Counter {
                field: "fullmove number",
                value: "0".to_string(),
            },
        ),
    ];
    for (fen, expected) in cases {
        assert_eq!(parse_fen(fen), Err(expected), "{fen}");
    }
}

#[test]
fn test_invariant_errors() {
    assert_eq!(
        parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(PositionError::KingCount {
            color: Color::Black,
            count: 0
        })
    );
    assert_eq!(
        parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
        Err(PositionError::KingCount {
            color: Color::White,
            count: 2
        })
    );
    assert_eq!(
        parse_fen("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
        Err(PositionError::PawnOnBackRank(Square::A1))
    );
    assert_eq!(
        parse_fen("4k3/8/8/8/8/8/8/4K2r b - - 0 1"),
        Err(PositionError::OpponentInCheck(Color::White))
    );
}

#[test]
fn test_en_passant_target_must_match_a_double_push() {
    // No white pawn on e4.
    assert!(matches!(
        parse_fen("4k3/8/8/8/8/8/8/4K3 b - e3 0 1"),
        Err(PositionError::EnPassant(_))
    ));
    // Wrong rank for the side to move.
    assert!(matches!(
        parse_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1"),
        Err(PositionError::EnPassant(_))
    ));
    assert!(parse_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").is_ok());
}

#[test]
fn test_signature_is_first_four_fields() {
    let pos = parse_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 12 30").unwrap();
    assert_eq!(signature(&pos), "4k3/8/8/8/4P3/8/8/4K3 b - e3");
}
