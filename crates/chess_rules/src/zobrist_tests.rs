use super::*;
use crate::types::PieceKind;

#[test]
fn keys_are_unique() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for kind in 0..6 {
            for sq in 0..64 {
                assert!(
                    seen.insert(ZOBRIST.pieces[color][kind][sq]),
                    "duplicate piece key"
                );
            }
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move), "side-to-move key collision");
    for i in 0..4 {
        assert!(seen.insert(ZOBRIST.castling[i]), "castling key collision");
    }
    for i in 0..8 {
        assert!(seen.insert(ZOBRIST.en_passant[i]), "en-passant key collision");
    }
}

#[test]
fn piece_key_depends_on_square() {
    let piece = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    assert_ne!(ZOBRIST.piece_key(piece, 0), ZOBRIST.piece_key(piece, 1));
}

#[test]
fn hash_ignores_clocks() {
    let a = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 42 90").unwrap();
    assert_eq!(a.position_hash(), b.position_hash());
}

#[test]
fn hash_tracks_the_repetition_tuple() {
    let base = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        .unwrap();
    let flipped = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    let fewer_rights =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
    assert_ne!(base.position_hash(), flipped.position_hash());
    assert_ne!(base.position_hash(), fewer_rights.position_hash());
}
