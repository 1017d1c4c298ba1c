use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for san in moves {
        game.submit_san(san)
            .unwrap_or_else(|e| panic!("{san} rejected: {e}"));
    }
}

const KNIGHT_SHUFFLE: [&str; 4] = ["Nf3", "Nf6", "Ng1", "Ng8"];

#[test]
fn test_new_game() {
    let game = Game::new();
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.ply_count(), 0);
    assert_eq!(game.legal_moves(None).count(), 20);
    assert_eq!(game.legal_moves(Some(sq("g1"))).count(), 2);
    assert_eq!(game.legal_moves(Some(sq("e4"))).count(), 0);
    assert_eq!(game.result(), "*");
    assert_eq!(game.pgn_movetext(), "*");
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    play(&mut game, &["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.is_in_check(Color::White));
    assert_eq!(game.result(), "0-1");
    assert_eq!(game.history_as_notation().last().map(String::as_str), Some("Qh4#"));
    assert_eq!(game.pgn_movetext(), "1. f3 e5 2. g4 Qh4# 0-1");
    assert_eq!(game.legal_moves(None).count(), 0);

    let fen = game.export_position();
    assert_eq!(
        game.submit_move(sq("e2"), sq("e4"), None),
        Err(ChessError::GameOver(GameStatus::Checkmate))
    );
    assert!(matches!(game.submit_san("e4"), Err(ChessError::GameOver(_))));
    assert!(matches!(game.submit_uci("e2e4"), Err(ChessError::GameOver(_))));
    assert_eq!(game.export_position(), fen);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = Game::new();
    play(&mut game, &["e4"]);
    let fen = game.export_position();
    assert_eq!(
        game.submit_move(sq("e7"), sq("e4"), None),
        Err(ChessError::IllegalMove {
            from: sq("e7"),
            to: sq("e4")
        })
    );
    assert!(matches!(
        game.submit_move(sq("e7"), sq("e5"), Some(PieceKind::Queen)),
        Err(ChessError::InvalidPromotion { .. })
    ));
    assert!(matches!(
        game.submit_san("Qxe8"),
        Err(ChessError::InvalidNotation { .. })
    ));
    assert_eq!(game.export_position(), fen);
    assert_eq!(game.ply_count(), 1);
    assert_eq!(game.history_as_notation(), ["e4"]);
}

#[test]
fn test_promotion_choice() {
    let mut game = Game::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    for requested in [None, Some(PieceKind::King), Some(PieceKind::Pawn)] {
        assert_eq!(
            game.submit_move(sq("b7"), sq("b8"), requested),
            Err(ChessError::InvalidPromotion {
                from: sq("b7"),
                to: sq("b8"),
                requested
            })
        );
    }
    let mv = game
        .submit_move(sq("b7"), sq("b8"), Some(PieceKind::Rook))
        .unwrap();
    assert_eq!(mv.promotion(), Some(PieceKind::Rook));
    assert_eq!(
        game.position().piece_at(sq("b8")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(game.history_as_notation(), ["b8=R+"]);
}

#[test]
fn test_undo_and_reset() {
    let mut game = Game::new();
    assert_eq!(game.undo(), Err(ChessError::NothingToUndo));

    play(&mut game, &["f3", "e5", "g4", "Qh4#"]);
    let mate = game.undo().unwrap();
    assert_eq!(mate.from, sq("d8"));
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.ply_count(), 3);
    assert_eq!(game.history_as_notation(), ["f3", "e5", "g4"]);

    game.reset();
    assert_eq!(game.ply_count(), 0);
    assert_eq!(game.export_position(), Position::startpos().to_fen());
    assert_eq!(game.legal_moves(None).count(), 20);
    assert!(game.history_as_notation().is_empty());
}

#[test]
fn test_repetition_counts_follow_undo() {
    let mut game = Game::new();
    play(&mut game, &KNIGHT_SHUFFLE);
    play(&mut game, &KNIGHT_SHUFFLE);
    assert_eq!(game.status(), GameStatus::DrawByRepetition);
    assert_eq!(game.result(), "1/2-1/2");

    game.undo().unwrap();
    assert_eq!(game.status(), GameStatus::InProgress);
    play(&mut game, &["Ng8"]);
    assert_eq!(game.status(), GameStatus::DrawByRepetition);
}

#[test]
fn test_draw_rules_can_be_relaxed() {
    let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 100 80";
    let game = Game::from_fen(fen).unwrap();
    assert_eq!(game.status(), GameStatus::DrawByFiftyMove);

    let relaxed = DrawRules {
        fifty_move_halfmoves: 0,
        ..DrawRules::default()
    };
    let game = Game::from_fen(fen).unwrap().with_rules(relaxed);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.rules(), relaxed);

    let game = Game::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::DrawByInsufficientMaterial);
    let game = game.with_rules(DrawRules {
        insufficient_material: false,
        ..DrawRules::default()
    });
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_imported_terminal_positions() {
    let game = Game::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert_eq!(game.result(), "1-0");

    let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::Stalemate);
    assert!(game.status().is_draw());
}

#[test]
fn test_drawn_game_lists_no_moves() {
    let mut game = Game::from_fen("8/8/8/4k3/8/4K3/8/R7 w - - 100 60").unwrap();
    assert_eq!(game.status(), GameStatus::DrawByFiftyMove);
    assert_eq!(game.legal_moves(None).count(), 0);
    assert_eq!(game.legal_moves(Some(sq("a1"))).count(), 0);
    assert_eq!(
        game.submit_move(sq("a1"), sq("a2"), None),
        Err(ChessError::GameOver(GameStatus::DrawByFiftyMove))
    );

    // Relaxing the rule makes the same position playable again.
    game = game.with_rules(DrawRules {
        fifty_move_halfmoves: 0,
        ..DrawRules::default()
    });
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.legal_moves(Some(sq("a1"))).count(), 14);
}

#[test]
fn test_movetext_from_black_to_move() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 12").unwrap();
    play(&mut game, &["Kd7", "e4"]);
    assert_eq!(game.pgn_movetext(), "12... Kd7 13. e4 *");
    assert_eq!(game.position_at(0), Some(game.initial_position()));
    assert_eq!(game.position_at(2), Some(game.position()));
    assert_eq!(game.position_at(3), None);
}

#[test]
fn test_status_serializes_snake_case() {
    let json = serde_json::to_string(&GameStatus::DrawByFiftyMove).unwrap();
    assert_eq!(json, "\"draw_by_fifty_move\"");
    let rules: DrawRules = serde_json::from_str(r#"{"repetition_count": 5}"#).unwrap();
    assert_eq!(rules.repetition_count, 5);
    assert_eq!(rules.fifty_move_halfmoves, 100);
}
