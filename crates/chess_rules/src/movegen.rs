//! Pseudo-legal and legal move generation.

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::board::Position;
use crate::types::*;

const PROMO_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// All legal moves, freshly allocated. Clones the position once to drive the
/// make/test/unmake legality filter.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Legal move generation into a reusable buffer.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves(pos, out);
    // Own-king-safety filter: play each candidate and test for check.
    out.retain(|&mv| !pos.would_leave_in_check(mv));
}

/// Every move that obeys piece movement rules, ignoring king safety.
pub fn pseudo_legal_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    let own = pos.occupancy(us);
    let occ = pos.occupied();

    for from in pos.pieces(us, PieceKind::Pawn) {
        gen_pawn(pos, from, us, out);
    }
    for from in pos.pieces(us, PieceKind::Knight) {
        push_targets(out, from, knight_attacks(from) & !own);
    }
    for from in pos.pieces(us, PieceKind::Bishop) {
        push_targets(out, from, bishop_attacks(from, occ) & !own);
    }
    for from in pos.pieces(us, PieceKind::Rook) {
        push_targets(out, from, rook_attacks(from, occ) & !own);
    }
    for from in pos.pieces(us, PieceKind::Queen) {
        push_targets(
            out,
            from,
            (bishop_attacks(from, occ) | rook_attacks(from, occ)) & !own,
        );
    }
    if let Some(from) = pos.king_sq(us) {
        push_targets(out, from, king_attacks(from) & !own);
        gen_castle(pos, from, us, out);
    }
}

fn push_targets(out: &mut Vec<Move>, from: u8, targets: crate::bitboard::Bitboard) {
    for to in targets {
        out.push(Move::new(from, to));
    }
}

fn push_pawn(out: &mut Vec<Move>, from: u8, to: u8, promo_rank: i8, is_en_passant: bool) {
    if rank_of(to) == promo_rank {
        // One move per promotion kind; the codec rejects kind-less input.
        for pk in PROMO_KINDS {
            let mut mv = Move::new(from, to);
            mv.promo = Some(pk);
            out.push(mv);
        }
    } else {
        let mut mv = Move::new(from, to);
        mv.is_en_passant = is_en_passant;
        out.push(mv);
    }
}

fn gen_pawn(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    let (dir, start_rank, promo_rank): (i8, i8, i8) = match us {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };
    let f = file_of(from);
    let r = rank_of(from);
    let occ = pos.occupied();
    let their = pos.occupancy(us.other());

    // Single push, and double push from the start rank when both are empty.
    if let Some(to) = sq(f, r + dir) {
        if !occ.contains(to) {
            push_pawn(out, from, to, promo_rank, false);
            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if !occ.contains(to2) {
                        let mut mv = Move::new(from, to2);
                        mv.is_double_push = true;
                        out.push(mv);
                    }
                }
            }
        }
    }

    // Diagonal captures, including en passant.
    for to in pawn_attacks(from, us) {
        if their.contains(to) {
            push_pawn(out, from, to, promo_rank, false);
        } else if pos.en_passant == Some(to) {
            push_pawn(out, from, to, promo_rank, true);
        }
    }
}

fn gen_castle(pos: &Position, from: u8, us: Color, out: &mut Vec<Move>) {
    // Castling never escapes check.
    if pos.in_check(us) {
        return;
    }

    // (right held, king from, king to, rook from, must-be-empty, must-be-safe)
    type Candidate = (bool, u8, u8, u8, &'static [u8], &'static [u8]);
    let candidates: [Candidate; 2] = match us {
        Color::White => [
            (pos.castling.wk, 4, 6, 7, &[5, 6], &[5, 6]),
            (pos.castling.wq, 4, 2, 0, &[1, 2, 3], &[2, 3]),
        ],
        Color::Black => [
            (pos.castling.bk, 60, 62, 63, &[61, 62], &[61, 62]),
            (pos.castling.bq, 60, 58, 56, &[57, 58, 59], &[58, 59]),
        ],
    };

    let occ = pos.occupied();
    let enemy = us.other();
    for (held, kf, kt, rf, empties, safes) in candidates {
        if !held || from != kf {
            continue;
        }
        // Right may be stale in a hand-written FEN; require the rook too.
        match pos.piece_at(rf) {
            Some(pc) if pc.color == us && pc.kind == PieceKind::Rook => {}
            _ => continue,
        }
        if empties.iter().any(|&s| occ.contains(s)) {
            continue;
        }
        // Transit and destination squares must not be attacked.
        if safes.iter().any(|&s| pos.is_square_attacked(s, enemy)) {
            continue;
        }
        let mut mv = Move::new(kf, kt);
        mv.is_castle = true;
        out.push(mv);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
