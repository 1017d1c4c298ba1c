use super::*;

fn session() -> Session {
    Session::new(&CliConfig::default()).unwrap()
}

fn run(session: &mut Session, line: &str) -> Response {
    session
        .execute(line)
        .unwrap_or_else(|| panic!("no response to {line:?}"))
}

#[test]
fn test_blank_lines_are_ignored() {
    let mut s = session();
    assert_eq!(s.execute(""), None);
    assert_eq!(s.execute("   "), None);
}

#[test]
fn test_moves_in_both_notations() {
    let mut s = session();
    let reply = run(&mut s, "move e2e4");
    assert!(matches!(&reply, Response::Moved { san, .. } if san == "e4"));
    assert_eq!(reply.to_string(), "e4");

    run(&mut s, "e5");
    run(&mut s, "m Nf3");
    assert_eq!(run(&mut s, "history").to_string(), "e4 e5 Nf3");
    assert_eq!(run(&mut s, "pgn").to_string(), "1. e4 e5 2. Nf3 *");
}

#[test]
fn test_errors_become_responses() {
    let mut s = session();
    let reply = run(&mut s, "move e2e5");
    assert_eq!(
        reply,
        Response::Error {
            message: "illegal move: e2 to e5".to_string()
        }
    );
    assert!(matches!(run(&mut s, "undo"), Response::Error { .. }));
    assert!(matches!(run(&mut s, "frobnicate now"), Response::Error { .. }));
    assert!(matches!(run(&mut s, "moves z9"), Response::Error { .. }));
    assert!(matches!(run(&mut s, "fen not a fen"), Response::Error { .. }));
    assert_eq!(s.game().ply_count(), 0);
}

#[test]
fn test_listing_moves() {
    let mut s = session();
    assert_eq!(run(&mut s, "moves g1").to_string(), "Nf3 Nh3");
    match run(&mut s, "moves") {
        Response::Moves { moves } => assert_eq!(moves.len(), 20),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(run(&mut s, "moves e4").to_string(), "no legal moves");
}

#[test]
fn test_fools_mate_session() {
    let mut s = session();
    for mv in ["f3", "e5", "g4"] {
        run(&mut s, mv);
    }
    assert_eq!(run(&mut s, "Qh4").to_string(), "Qh4# (checkmate)");
    assert_eq!(run(&mut s, "status").to_string(), "checkmate 0-1, in check");
    assert!(matches!(run(&mut s, "a3"), Response::Error { .. }));

    assert!(matches!(run(&mut s, "undo"), Response::Undone { .. }));
    assert_eq!(s.game().status(), GameStatus::InProgress);

    let restart = run(&mut s, "restart");
    assert!(matches!(restart, Response::Position { ref fen, .. } if fen == chess_rules::STARTING_FEN));
}

#[test]
fn test_fen_and_new() {
    let mut s = session();
    let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    assert_eq!(
        run(&mut s, &format!("fen {fen}")).to_string(),
        format!("{fen}\nwhite to move, in progress")
    );
    assert_eq!(run(&mut s, "export"), run(&mut s, "fen"));
    run(&mut s, "e4");
    run(&mut s, "restart");
    assert_eq!(s.game().export_position(), fen);

    run(&mut s, "new");
    assert_eq!(s.game().export_position(), chess_rules::STARTING_FEN);
}

#[test]
fn test_configured_start_and_rules() {
    let config = CliConfig {
        start_fen: Some("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1".to_string()),
        rules: DrawRules {
            insufficient_material: false,
            ..DrawRules::default()
        },
        ..CliConfig::default()
    };
    let s = Session::new(&config).unwrap();
    assert_eq!(s.game().status(), GameStatus::InProgress);

    let bad = CliConfig {
        start_fen: Some("8/8/8/8/8/8/8/8 w - - 0 1".to_string()),
        ..CliConfig::default()
    };
    assert!(matches!(
        Session::new(&bad),
        Err(ChessError::MalformedPosition(_))
    ));
}

#[test]
fn test_board_diagram() {
    let mut s = session();
    let Response::Board { diagram } = run(&mut s, "board") else {
        panic!("expected a board");
    };
    let lines: Vec<&str> = diagram.lines().collect();
    assert_eq!(lines[0], "8 r n b q k b n r");
    assert_eq!(lines[4], "4 . . . . . . . .");
    assert_eq!(lines[7], "1 R N B Q K B N R");
    assert_eq!(lines[8], "  a b c d e f g h");
}

#[test]
fn test_json_shape() {
    let mut s = session();
    let reply = run(&mut s, "e4");
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["type"], "moved");
    assert_eq!(value["san"], "e4");
    assert_eq!(value["move"]["from"], "e2");
    assert_eq!(value["move"]["kind"], "double_pawn_push");
    assert_eq!(value["status"], "in_progress");

    let bye = serde_json::to_value(run(&mut s, "quit")).unwrap();
    assert_eq!(bye["type"], "bye");
}
