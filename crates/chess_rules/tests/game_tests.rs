//! Game-level tests: apply/undo restoration, king safety, FEN round-trips,
//! and the checked `Game` layer.

use chess_rules::{
    legal_moves, Color, Game, GameError, Outcome, PieceKind, Position,
};

// =============================================================================
// make/unmake restoration
// =============================================================================

#[test]
fn make_unmake_restores_position_exactly() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let original = Position::from_fen(fen).unwrap();
        for mv in legal_moves(&original) {
            let mut pos = original.clone();
            let undo = pos.make_move(mv);
            assert_ne!(pos, original, "move changed nothing in {fen}");
            pos.unmake_move(mv, undo);
            assert_eq!(pos, original, "undo failed for {mv:?} in {fen}");
        }
    }
}

#[test]
fn no_legal_move_leaves_own_king_attacked() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        // Pinned pieces and a checked king.
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        let mover = pos.side_to_move;
        for mv in legal_moves(&pos) {
            let mut after = pos.clone();
            after.make_move(mv);
            let king = after.king_sq(mover).unwrap();
            assert!(
                !after.is_square_attacked(king, mover.other()),
                "{mv:?} leaves the king en prise in {fen}"
            );
        }
    }
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = Game::from_fen(
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    )
    .unwrap();
    let (mv, _) = game.play_text("exd6").unwrap();
    assert!(mv.is_en_passant);
    // The d5 pawn is gone even though the capture landed on d6.
    assert!(game.position().piece_at(35).is_none());
    let pawn = game.position().piece_at(43).unwrap();
    assert_eq!(pawn.color, Color::White);
    assert_eq!(pawn.kind, PieceKind::Pawn);
}

// =============================================================================
// FEN round-trips
// =============================================================================

#[test]
fn fen_round_trip() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b Kq e3 0 13",
        "8/8/8/4k3/8/3K4/8/8 w - - 99 60",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }
}

#[test]
fn fen_rejects_garbage() {
    for bad in [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
        // En-passant target on an impossible rank, or for the wrong side.
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
        // Two white kings.
        "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        // No black king.
        "8/8/8/8/8/8/8/4K3 w - - 0 1",
    ] {
        assert!(Position::from_fen(bad).is_err(), "{bad:?} parsed");
    }
}

// =============================================================================
// Game layer
// =============================================================================

#[test]
fn fools_mate_ends_in_checkmate() {
    let mut game = Game::new();
    for text in ["f3", "e5", "g4"] {
        let (_, outcome) = game.play_text(text).unwrap();
        assert_eq!(outcome, Outcome::Ongoing);
    }
    let (_, outcome) = game.play_text("Qh4#").unwrap();
    assert_eq!(outcome, Outcome::Checkmate(Color::White));
    assert!(game.outcome().is_terminal());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.result_string(), "0-1");
    assert_eq!(game.last_san(), Some("Qh4#"));
}

#[test]
fn terminal_game_rejects_further_moves() {
    let mut game = Game::new();
    for text in ["f3", "e5", "g4", "Qh4#"] {
        game.play_text(text).unwrap();
    }
    let err = game.play_text("a3").unwrap_err();
    assert!(matches!(err, GameError::GameAlreadyOver));
}

#[test]
fn illegal_move_is_rejected_and_state_unchanged() {
    let mut game = Game::new();
    let before = game.position().clone();

    // Legal shape but not in the legal set for the start position.
    assert!(matches!(
        game.play_text("Qh5"),
        Err(GameError::Notation(_))
    ));
    assert!(matches!(
        game.play_text("e2e5"),
        Err(GameError::Notation(_))
    ));
    assert_eq!(game.position(), &before);
    assert_eq!(game.ply(), 0);
}

#[test]
fn play_rejects_moves_outside_the_legal_set() {
    let mut game = Game::new();
    let mut mv = game.legal_moves()[0];
    mv.to = mv.from; // corrupt it
    assert!(matches!(game.play(mv), Err(GameError::IllegalMoveApplied)));
}

#[test]
fn undo_steps_back_and_clears_terminal_state() {
    let mut game = Game::new();
    let start = game.position().clone();
    for text in ["f3", "e5", "g4", "Qh4#"] {
        game.play_text(text).unwrap();
    }
    assert!(game.outcome().is_terminal());

    let undone = game.undo().unwrap();
    assert_eq!(undone.to, 31); // h4
    assert_eq!(game.outcome(), Outcome::Ongoing);
    assert!(!game.legal_moves().is_empty());

    for _ in 0..3 {
        game.undo().unwrap();
    }
    assert_eq!(game.position(), &start);
    assert_eq!(game.ply(), 0);
    assert!(game.undo().is_none());
}

#[test]
fn san_history_records_the_game() {
    let mut game = Game::new();
    for text in ["e4", "e5", "Nf3", "Nc6"] {
        game.play_text(text).unwrap();
    }
    let history: Vec<&str> = game.san_history().collect();
    assert_eq!(history, ["e4", "e5", "Nf3", "Nc6"]);
    assert_eq!(game.ply(), 4);
}

#[test]
fn destinations_from_matches_legal_moves() {
    let game = Game::new();
    let dests = game.destinations_from(12); // e2
    assert_eq!(dests.len(), 2);
    assert!(dests.contains(&20) && dests.contains(&28));
    assert!(game.destinations_from(28).is_empty());
}

#[test]
fn game_from_position_in_check_only_offers_evasions() {
    // Bishop on h4 checks the king on e1 along the diagonal.
    let game = Game::from_fen("4k3/8/8/8/7b/8/8/4K3 w - - 0 1").unwrap();
    assert!(game.in_check());
    assert!(!game.legal_moves().is_empty());
    for mv in game.legal_moves() {
        let mut after = game.position().clone();
        after.make_move(*mv);
        let king = after.king_sq(Color::White).unwrap();
        assert!(!after.is_square_attacked(king, Color::Black));
    }
}
